//! テスト用のメモリ上の `MetadataStore`。

use crate::domain::metadata_fields::{MetadataField, MetadataFieldSet};
use crate::domain::metadata_store::{MetadataError, MetadataStore};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// 書き込みを記録し、読み書きの失敗を注入できるストア。
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, MetadataFieldSet>>,
    writes: RefCell<Vec<(PathBuf, MetadataFieldSet)>>,
    failing_reads: HashSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, fields: MetadataFieldSet) -> Self {
        self.files.borrow_mut().insert(path.into(), fields);
        self
    }

    pub fn failing_read(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_reads.insert(path.into());
        self
    }

    pub fn failing_write(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_writes.insert(path.into());
        self
    }

    pub fn fields_of(&self, path: impl AsRef<Path>) -> MetadataFieldSet {
        self.files
            .borrow()
            .get(path.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<(PathBuf, MetadataFieldSet)> {
        self.writes.borrow().clone()
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl MetadataStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<MetadataFieldSet, MetadataError> {
        if self.failing_reads.contains(path) {
            return Err(MetadataError::read(path, "injected read failure"));
        }
        Ok(self.fields_of(path))
    }

    fn write(&self, path: &Path, fields: &MetadataFieldSet) -> Result<(), MetadataError> {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), fields.clone()));
        if self.failing_writes.contains(path) {
            return Err(MetadataError::write(path, "injected write failure"));
        }

        // 書き込まれたフィールドだけを置き換える
        let current = self.fields_of(path);
        let mut updated = MetadataFieldSet::new();
        for field in MetadataField::ALL {
            let source = if fields.contains_field(field) {
                fields
            } else {
                &current
            };
            updated = updated.with_values(field, source.values(field));
        }
        self.files.borrow_mut().insert(path.to_path_buf(), updated);
        Ok(())
    }
}
