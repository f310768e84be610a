use std::path::PathBuf;
use thiserror::Error;

// エラー型を定義
#[derive(Debug, Error)]
pub enum PathError {
    #[error("フォルダが見つかりません: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("パス '{}' はディレクトリではありません。", .0.display())]
    NotADirectory(PathBuf),

    #[error("フォルダの走査に失敗しました: {0}")]
    WalkError(#[from] walkdir::Error),
}
