//! 隣り合う画像ペアのメタデータをマージする中心ロジック。
//!
//! ファイル一覧を1回だけ走査し、候補ペアごとに3つのフィールドの和集合を計算して、
//! 値が欠けている側にだけ書き戻します。3枚以上の連続した重複は検出しません。

use crate::domain::image_file::ImageFile;
use crate::domain::metadata_fields::MetadataFieldSet;
use crate::domain::metadata_store::{MetadataError, MetadataStore};
use crate::domain::pairing::{CandidatePair, PairPredicate};
use std::fmt;

// --- 構造体定義 ---

/// 1回の実行結果の集計。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    /// 候補として判定されたペアの数。
    pub candidates: usize,
    /// 少なくとも1ファイルへの書き込みが成功したペアの数。
    pub merged: usize,
    /// 両方のファイルがすでに同じ値を持っていたペアの数。
    pub already_in_sync: usize,
    /// 読み込みに失敗してスキップしたペアの数。
    pub read_failures: usize,
    /// 書き込みに失敗したファイルの数。
    pub write_failures: usize,
    /// 書き込みに成功したファイルの数。
    pub files_written: usize,
}

/// 1ペアの処理結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOutcome {
    Skipped,
    InSync,
    Written { files_written: usize, failures: usize },
}

/// 隣り合うペアを判定し、メタデータをマージする。
pub struct PairMerger<P> {
    predicate: P,
}

// --- 実装ブロック ---

impl<P: PairPredicate> PairMerger<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// フォルダ内の画像一覧を走査し、候補ペアのメタデータをマージします。
    ///
    /// # 引数
    /// * `files`: フォルダ内の画像ファイル。ここでペア判定用の順序に並べ直されます。
    /// * `store`: メタデータの読み書きに使うストア。
    ///
    /// # 戻り値
    /// 集計結果。`merged` が実際に書き込みが発生したペアの数です。
    /// ペア単位の失敗はログに出力され、走査は続行されます。
    pub fn merge_folder<S>(&mut self, files: &[ImageFile], store: &S) -> MergeReport
    where
        S: MetadataStore + ?Sized,
    {
        // 1. ファイル一覧をペア判定の順序に並べる
        let mut files = files.to_vec();
        ImageFile::sort_for_pairing(&mut files);

        // 2. 隣り合うペアを順に判定する
        let mut report = MergeReport::default();
        let mut i = 0;
        while i + 1 < files.len() {
            let (first, second) = (&files[i], &files[i + 1]);
            if !self.predicate.is_candidate(first, second) {
                log::trace!("{} と {} は別の写真として扱います。", first, second);
                i += 1;
                continue;
            }

            report.candidates += 1;
            log::debug!(
                "{} と {} は同じ写真のようです。メタデータをマージします。",
                first,
                second
            );
            match merge_pair(CandidatePair { first, second }, store) {
                PairOutcome::Skipped => report.read_failures += 1,
                PairOutcome::InSync => report.already_in_sync += 1,
                PairOutcome::Written {
                    files_written,
                    failures,
                } => {
                    report.files_written += files_written;
                    report.write_failures += failures;
                    if files_written > 0 {
                        report.merged += 1;
                    }
                }
            }

            // 3. ペアの2枚目から新しいペアを始めない
            i += 2;
        }

        report
    }
}

/// 1ペア分の読み込み・和集合の計算・書き戻しを行います。
fn merge_pair<S>(pair: CandidatePair<'_>, store: &S) -> PairOutcome
where
    S: MetadataStore + ?Sized,
{
    // 1. 両方のファイルを読み込む。どちらかが失敗したらペアごとスキップ
    let read_both = || -> Result<(MetadataFieldSet, MetadataFieldSet), MetadataError> {
        Ok((
            store.read(pair.first.path())?,
            store.read(pair.second.path())?,
        ))
    };
    let (first_fields, second_fields) = match read_both() {
        Ok(fields) => fields,
        Err(e) => {
            log::warn!("{}。このペアはスキップします。", e);
            return PairOutcome::Skipped;
        }
    };

    // 2. フィールドごとの和集合
    let union = first_fields.union(&second_fields);
    log::debug!(
        "{} と {} を合わせた値: {}",
        pair.first.file_name(),
        pair.second.file_name(),
        union
    );

    // 3. 値が欠けている側にだけ書き込む
    let mut files_written = 0;
    let mut failures = 0;
    for (file, current) in [(pair.first, &first_fields), (pair.second, &second_fields)] {
        let missing = union.missing_from(current);
        if missing.is_empty() {
            log::debug!("{} はすでにすべての値を持っています。", file);
            continue;
        }
        log::info!("{} に次の値を書き込みます: {}", file, missing);
        match store.write(file.path(), &missing) {
            Ok(()) => files_written += 1,
            Err(e) => {
                log::error!("{}", e);
                failures += 1;
            }
        }
    }

    if files_written == 0 && failures == 0 {
        PairOutcome::InSync
    } else {
        PairOutcome::Written {
            files_written,
            failures,
        }
    }
}

// --- トレイト実装 ---

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "候補ペア {} 件中 {} 件をマージしました（同期済み {} 件、読み込み失敗 {} 件、書き込み失敗 {} ファイル）",
            self.candidates,
            self.merged,
            self.already_in_sync,
            self.read_failures,
            self.write_failures
        )
    }
}

// --- テストモジュール ---
