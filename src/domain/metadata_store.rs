use crate::domain::metadata_fields::MetadataFieldSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// メタデータの読み書き時に発生するエラー。
///
/// どちらもファイル単位のエラーで、実行全体を止めるものではありません。
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("'{}' のメタデータを読み込めませんでした: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("'{}' にメタデータを書き込めませんでした: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl MetadataError {
    pub fn read(path: &Path, reason: impl Into<String>) -> Self {
        MetadataError::Read {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn write(path: &Path, reason: impl Into<String>) -> Self {
        MetadataError::Write {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// 外部ツール（またはネイティブライブラリ）によるメタデータの読み書きを抽象化したトレイト。
///
/// マージ処理はファイルに直接触れず、このトレイトだけを通して読み書きします。
pub trait MetadataStore {
    /// Keyword / Subject / HierarchicalSubject の現在の値を読み込みます。
    fn read(&self, path: &Path) -> Result<MetadataFieldSet, MetadataError>;

    /// `fields` に含まれるフィールドを、与えられた値のリストで置き換えます。
    /// 含まれないフィールドには触れません。
    fn write(&self, path: &Path, fields: &MetadataFieldSet) -> Result<(), MetadataError>;
}

impl<S: MetadataStore + ?Sized> MetadataStore for &S {
    fn read(&self, path: &Path) -> Result<MetadataFieldSet, MetadataError> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, fields: &MetadataFieldSet) -> Result<(), MetadataError> {
        (**self).write(path, fields)
    }
}
