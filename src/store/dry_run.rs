use crate::domain::metadata_fields::MetadataFieldSet;
use crate::domain::metadata_store::{MetadataError, MetadataStore};
use std::path::Path;

/// 読み込みは内側のストアに任せ、書き込みはログに出すだけのストア。
#[derive(Debug)]
pub struct DryRunStore<S> {
    inner: S,
}

impl<S: MetadataStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: MetadataStore> MetadataStore for DryRunStore<S> {
    fn read(&self, path: &Path) -> Result<MetadataFieldSet, MetadataError> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, fields: &MetadataFieldSet) -> Result<(), MetadataError> {
        for field in fields.fields() {
            let values: Vec<&str> = fields.values(field).collect();
            log::info!(
                "[dry-run] {}: {} = {}",
                path.display(),
                field,
                values.join(", ")
            );
        }
        Ok(())
    }
}
