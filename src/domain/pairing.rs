//! 隣り合う2つの画像が「同じ写真の別バージョン」かどうかを判定するルール。

use crate::domain::image_file::ImageFile;
use crate::domain::perceptual_hash::AverageHash;
use std::collections::HashMap;
use std::path::PathBuf;

/// 高解像度版などのファイル名で、元のファイル名の後ろに続く区切り文字。
const SUFFIX_SEPARATORS: &[char] = &['_', '-', ' ', '.', '('];

/// 同一写真とみなす既定の最大ハミング距離。
pub const DEFAULT_MAX_HASH_DIFFERENCE: u32 = 1;

/// ペア候補かどうかを判定するトレイト。
///
/// 判定結果をキャッシュできるよう `&mut self` を受け取ります。
pub trait PairPredicate {
    fn is_candidate(&mut self, first: &ImageFile, second: &ImageFile) -> bool;
}

impl<P: PairPredicate + ?Sized> PairPredicate for Box<P> {
    fn is_candidate(&mut self, first: &ImageFile, second: &ImageFile) -> bool {
        (**self).is_candidate(first, second)
    }
}

/// 候補ペア（隣り合う2ファイル）。
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    pub first: &'a ImageFile,
    pub second: &'a ImageFile,
}

// --- ファイル名ルール ---

/// ファイル名の類似性で判定する既定のルール。
///
/// 拡張子を除いた名前（大文字小文字を区別しない）が一致するか、
/// 長い方が短い方の名前 + 区切り文字 + 1文字以上で構成されている場合に一致とみなします。
/// 例: `photo_001.jpg` と `photo_001_hires.jpg`、`IMG_1234.jpg` と `IMG_1234 (2).jpg`。
#[derive(Debug, Default, Clone, Copy)]
pub struct FileNameRule;

impl FileNameRule {
    pub fn stems_match(first: &str, second: &str) -> bool {
        if first == second {
            return true;
        }
        let (short, long) = if first.len() <= second.len() {
            (first, second)
        } else {
            (second, first)
        };
        match long.strip_prefix(short) {
            Some(rest) => {
                let mut chars = rest.chars();
                let starts_with_separator = chars
                    .next()
                    .is_some_and(|c| SUFFIX_SEPARATORS.contains(&c));
                starts_with_separator && chars.next().is_some()
            }
            None => false,
        }
    }
}

impl PairPredicate for FileNameRule {
    fn is_candidate(&mut self, first: &ImageFile, second: &ImageFile) -> bool {
        Self::stems_match(&first.stem_lowercase(), &second.stem_lowercase())
    }
}

// --- 知覚ハッシュルール ---

/// 平均ハッシュのハミング距離で判定するルール。
///
/// デコードできない画像は一致しないものとして扱います。
/// ハッシュは1回の実行中キャッシュされ、各ファイルのデコードは1度だけです。
#[derive(Debug)]
pub struct PerceptualHashRule {
    max_difference: u32,
    cache: HashMap<PathBuf, Option<AverageHash>>,
}

impl PerceptualHashRule {
    pub fn new(max_difference: u32) -> Self {
        Self {
            max_difference,
            cache: HashMap::new(),
        }
    }

    fn hash_of(&mut self, file: &ImageFile) -> Option<AverageHash> {
        if let Some(cached) = self.cache.get(file.path()) {
            return *cached;
        }
        let hash = match AverageHash::of_path(file.path()) {
            Ok(hash) => {
                log::trace!("{} の平均ハッシュ: {}", file, hash);
                Some(hash)
            }
            Err(e) => {
                log::warn!("{} のハッシュを計算できませんでした: {}", file, e);
                None
            }
        };
        self.cache.insert(file.path().to_path_buf(), hash);
        hash
    }
}

impl Default for PerceptualHashRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HASH_DIFFERENCE)
    }
}

impl PairPredicate for PerceptualHashRule {
    fn is_candidate(&mut self, first: &ImageFile, second: &ImageFile) -> bool {
        let (Some(a), Some(b)) = (self.hash_of(first), self.hash_of(second)) else {
            return false;
        };
        let distance = a.distance(b);
        log::trace!("{} と {} のハミング距離: {}", first, second, distance);
        distance <= self.max_difference
    }
}

// --- テストモジュール ---

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::path::Path;
    use tempfile::tempdir;

    fn file(name: &str) -> ImageFile {
        ImageFile::new(Path::new("album").join(name)).expect("image file")
    }

    #[test]
    fn file_name_rule_matches_resolution_suffixes() {
        let mut rule = FileNameRule;
        assert!(rule.is_candidate(&file("photo_001.jpg"), &file("photo_001_hires.jpg")));
        assert!(rule.is_candidate(&file("IMG_1234.JPG"), &file("img_1234 (2).jpg")));
        assert!(rule.is_candidate(&file("scan-7.tif"), &file("scan-7-print.tif")));
        assert!(rule.is_candidate(&file("a.hires.jpg"), &file("a.jpg")));
    }

    #[test]
    fn file_name_rule_matches_same_stem_with_other_extension() {
        let mut rule = FileNameRule;
        assert!(rule.is_candidate(&file("DSC_0042.jpg"), &file("dsc_0042.tif")));
    }

    #[test]
    fn file_name_rule_rejects_different_photos() {
        let mut rule = FileNameRule;
        assert!(!rule.is_candidate(&file("photo_001.jpg"), &file("photo_002.jpg")));
        assert!(!rule.is_candidate(&file("photo_001.jpg"), &file("photo_0010.jpg")));
        // 区切り文字だけが後ろに付いたものは別名とみなす
        assert!(!rule.is_candidate(&file("photo.jpg"), &file("photo_.jpg")));
    }

    #[test]
    fn perceptual_rule_compares_pixels_not_names() {
        let dir = tempdir().expect("Failed to create temp directory");
        let split = |size: u32, inverted: bool| {
            GrayImage::from_fn(size, size, move |x, _| {
                let left = x < size / 2;
                Luma([if left != inverted { 0 } else { 255 }])
            })
        };
        let small = dir.path().join("a.png");
        let large = dir.path().join("b.png");
        let other = dir.path().join("c.png");
        split(32, false).save(&small).expect("save");
        split(128, false).save(&large).expect("save");
        split(32, true).save(&other).expect("save");

        let small = ImageFile::new(&small).unwrap();
        let large = ImageFile::new(&large).unwrap();
        let other = ImageFile::new(&other).unwrap();

        let mut rule = PerceptualHashRule::default();
        assert!(rule.is_candidate(&small, &large));
        assert!(!rule.is_candidate(&large, &other));
        // 3ファイルともキャッシュされている
        assert_eq!(rule.cache.len(), 3);
    }

    #[test]
    fn perceptual_rule_never_matches_undecodable_files() {
        let dir = tempdir().expect("Failed to create temp directory");
        let broken = dir.path().join("broken.jpg");
        std::fs::write(&broken, b"not an image").expect("write");
        let broken = ImageFile::new(&broken).unwrap();

        let mut rule = PerceptualHashRule::default();
        assert!(!rule.is_candidate(&broken, &broken));
        assert_eq!(rule.cache.get(broken.path()), Some(&None));
    }
}
