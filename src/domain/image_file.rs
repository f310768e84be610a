use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// メタデータを持ちうる画像ファイルとして扱う拡張子（小文字）。
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "tif", "tiff", "dng", "cr2", "nef", "arw", "orf", "rw2",
];

/// フォルダ内の1枚の画像ファイル。
///
/// `new` を通じてのみ生成でき、拡張子が画像であることと、
/// ファイル名がUTF-8として扱えることが保証されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    file_name: String,
}

impl ImageFile {
    /// パスが画像ファイルを指している場合のみ `Some` を返します。
    pub fn new<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?.to_string();
        // ドットファイル (`.DS_Store` や `._photo.jpg` など) は対象外
        if file_name.starts_with('.') {
            return None;
        }
        if !is_image_file(path) {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 最後の拡張子を除いたファイル名を小文字で返します。
    pub fn stem_lowercase(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
            .to_lowercase()
    }

    /// ペア判定に使う順序（大文字小文字を区別しない辞書順）を比較します。
    pub fn pairing_cmp(&self, other: &Self) -> Ordering {
        self.file_name
            .to_lowercase()
            .cmp(&other.file_name.to_lowercase())
            .then_with(|| self.file_name.cmp(&other.file_name))
    }

    /// ペア判定に使う順序で並べ替えます。
    pub fn sort_for_pairing(files: &mut [ImageFile]) {
        files.sort_by(|a, b| a.pairing_cmp(b));
    }
}

impl fmt::Display for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// パスがサポートされている画像ファイルであるか、拡張子で簡易的に判定します。
pub fn is_image_file(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}
