//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! フォルダの検証・exiftool の確認・ペアのマージという処理の流れを実装します。

use merge_image_metadata::config::MergeConfig;
use merge_image_metadata::domain::input_source::directory_path::DirectoryPath;
use merge_image_metadata::domain::pair_merger::{MergeReport, PairMerger};
use merge_image_metadata::error::AppError;
use merge_image_metadata::store::{DryRunStore, ExifToolStore};

/// アプリケーションのメインロジックを実行します。
///
/// # 引数
/// * `config`: コマンドライン引数から組み立てた設定。
///
/// # 戻り値
/// * `Ok(MergeReport)`: 走査が最後まで完了した場合。ペア単位の失敗はここに集計されます。
/// * `Err(AppError)`: フォルダが存在しない、exiftool が使えないなど、回復不可能なエラーの場合。
pub fn run(config: &MergeConfig) -> Result<MergeReport, AppError> {
    // 1. 入力フォルダの検証
    // DirectoryPath::new を使うことで、パスが存在し、かつディレクトリであることが保証される。
    let folder = DirectoryPath::new(&config.folder)?;

    // 2. exiftool が実行できることを先に確認する
    let store = ExifToolStore::new(&config.exiftool);
    let version = store.version()?;
    log::debug!("exiftool {} を使用します: {}", version, store.program().display());

    // 3. 画像ファイルを列挙
    log::debug!("{} 内の画像ファイルを探しています...", folder);
    let files = folder.image_files()?;
    log::info!("{} 件の画像ファイルが見つかりました: {}", files.len(), folder);

    // 4. ペアを判定してマージ
    let mut merger = PairMerger::new(config.pairing.predicate());
    let report = if config.dry_run {
        log::info!("ドライランです。ファイルには書き込みません。");
        merger.merge_folder(&files, &DryRunStore::new(&store))
    } else {
        merger.merge_folder(&files, &store)
    };

    log::info!("{}", report);
    Ok(report)
}
