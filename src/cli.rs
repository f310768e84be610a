use clap::Parser;
use merge_image_metadata::config::{MergeConfig, PairingMode};
use std::path::PathBuf;

/// 同じ写真の別解像度版どうしで Keyword / Subject / HierarchicalSubject を統合するツール
///
/// メタデータの読み書きには exiftool を使います。
/// 連続する2枚だけを統合し、3枚以上の重複は正しく検出しません。
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 画像ファイルが含まれるフォルダのパス
    #[arg(required = true)]
    pub folder: PathBuf,

    /// 詳細な（デバッグ）出力を有効にする
    #[arg(short, long)]
    pub verbose: bool,

    /// 書き込みを行わず、書き込む予定の値だけを表示する
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// ファイル名ではなく画像の平均ハッシュでペアを判定する
    #[arg(long)]
    pub perceptual: bool,

    /// exiftool 実行ファイルのパス (オプション: デフォルトは PATH から探す)
    #[arg(long, env = "EXIFTOOL_PATH", default_value = "exiftool")]
    pub exiftool: PathBuf,
}

impl Args {
    pub fn into_config(self) -> MergeConfig {
        MergeConfig {
            folder: self.folder,
            exiftool: self.exiftool,
            dry_run: self.dry_run,
            pairing: if self.perceptual {
                PairingMode::Perceptual
            } else {
                PairingMode::FileName
            },
            log_level: MergeConfig::log_level_for(self.verbose),
        }
    }
}
