use crate::domain::input_source::path_error::PathError;
use std::path::PathBuf;
use thiserror::Error;

/// 実行全体を中断する致命的なエラー。
///
/// ペア単位の読み書きエラーは `MetadataError` として扱われ、ここには含まれません。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("パス関連のエラー: {0}")]
    Path(#[from] PathError),

    #[error("外部ツール '{}' を実行できません: {reason}", program.display())]
    ExternalToolUnavailable { program: PathBuf, reason: String },
}
