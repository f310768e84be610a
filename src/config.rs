use crate::domain::pairing::{FileNameRule, PairPredicate, PerceptualHashRule};
use crate::store::exiftool::DEFAULT_PROGRAM;
use log::LevelFilter;
use std::path::PathBuf;

/// ペア判定に使うルール。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    /// ファイル名の類似性（既定）。
    #[default]
    FileName,
    /// 平均ハッシュによる画像の類似性。
    Perceptual,
}

impl PairingMode {
    pub fn predicate(self) -> Box<dyn PairPredicate> {
        match self {
            PairingMode::FileName => Box::new(FileNameRule),
            PairingMode::Perceptual => Box::new(PerceptualHashRule::default()),
        }
    }
}

/// 1回の実行の設定。コマンドライン引数から一度だけ組み立てられます。
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub folder: PathBuf,
    pub exiftool: PathBuf,
    pub dry_run: bool,
    pub pairing: PairingMode,
    pub log_level: LevelFilter,
}

impl MergeConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            exiftool: PathBuf::from(DEFAULT_PROGRAM),
            dry_run: false,
            pairing: PairingMode::default(),
            log_level: Self::log_level_for(false),
        }
    }

    /// `-v` の有無からログレベルを決めます。
    pub fn log_level_for(verbose: bool) -> LevelFilter {
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
