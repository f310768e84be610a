use super::path_error::PathError;
use crate::domain::image_file::ImageFile;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// 構造体としてDirectoryPathを定義
#[derive(Debug)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::FolderNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// ディレクトリ直下の画像ファイルを、ペア判定に使う順序で返します。
    ///
    /// サブディレクトリには降りません。隠しファイル（`.`で始まる名前）は無視します。
    pub fn image_files(&self) -> Result<Vec<ImageFile>, PathError> {
        let mut files = Vec::new();
        // min_depth(1) でルート自身を除外し、max_depth(1) で直下のみに限定する
        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                log::trace!("ファイルではないためスキップ: {:?}", entry.path());
                continue;
            }
            match ImageFile::new(entry.path()) {
                Some(file) => files.push(file),
                None => log::trace!("画像ファイルではないためスキップ: {:?}", entry.path()),
            }
        }
        ImageFile::sort_for_pairing(&mut files);
        Ok(files)
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
