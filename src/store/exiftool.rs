//! exiftool を子プロセスとして呼び出す `MetadataStore` の実装。

use crate::domain::metadata_fields::{MetadataField, MetadataFieldSet};
use crate::domain::metadata_store::{MetadataError, MetadataStore};
use crate::error::AppError;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// `PATH` から探す既定のプログラム名。
pub const DEFAULT_PROGRAM: &str = "exiftool";

/// exiftool によるメタデータの読み書き。
#[derive(Debug, Clone)]
pub struct ExifToolStore {
    program: PathBuf,
}

impl ExifToolStore {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `exiftool -ver` を実行し、ツールが使えることを確認します。
    ///
    /// # 戻り値
    /// * `Ok(String)`: exiftool のバージョン。
    /// * `Err(AppError::ExternalToolUnavailable)`: 起動できない、またはバージョンを返さない場合。
    pub fn version(&self) -> Result<String, AppError> {
        let unavailable = |reason: String| AppError::ExternalToolUnavailable {
            program: self.program.clone(),
            reason,
        };

        let output = Command::new(&self.program)
            .arg("-ver")
            .output()
            .map_err(|e| unavailable(e.to_string()))?;
        if !output.status.success() {
            return Err(unavailable(failure_reason(&output)));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            return Err(unavailable("バージョン情報が返されませんでした".to_string()));
        }
        Ok(version)
    }

    fn run(&self, args: &[OsString]) -> std::io::Result<Output> {
        log::trace!("{} {:?}", self.program.display(), args);
        let output = Command::new(&self.program).args(args).output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::debug!("exiftool: {}", line.trim());
        }
        Ok(output)
    }
}

impl MetadataStore for ExifToolStore {
    fn read(&self, path: &Path) -> Result<MetadataFieldSet, MetadataError> {
        let output = self
            .run(&read_args(path))
            .map_err(|e| MetadataError::read(path, e.to_string()))?;
        if !output.status.success() {
            return Err(MetadataError::read(path, failure_reason(&output)));
        }
        parse_read_output(path, &output.stdout)
    }

    fn write(&self, path: &Path, fields: &MetadataFieldSet) -> Result<(), MetadataError> {
        let output = self
            .run(&write_args(path, fields))
            .map_err(|e| MetadataError::write(path, e.to_string()))?;
        if !output.status.success() {
            return Err(MetadataError::write(path, failure_reason(&output)));
        }
        Ok(())
    }
}

// --- private なヘルパー関数 ---

/// 読み書き共通のオプション。
fn common_args() -> Vec<OsString> {
    // タグの値は exiftool 既定の UTF-8 でやり取りする（-L は付けない）
    let mut args: Vec<OsString> = Vec::new();
    // Windows ではファイル名も UTF-8 として解釈させる
    if cfg!(windows) {
        args.push("-charset".into());
        args.push("filename=utf8".into());
    }
    args
}

/// 3つのフィールドをJSONで読み出す引数。
pub(crate) fn read_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-j".into()];
    args.extend(common_args());
    args.extend(
        MetadataField::ALL
            .iter()
            .map(|field| OsString::from(format!("-{}", field.exiftool_tag()))),
    );
    args.push(path.as_os_str().to_os_string());
    args
}

/// `fields` の値で各タグを置き換える引数。
///
/// 同じタグへの代入を繰り返すと、exiftool はそれらをリストとして書き込む。
pub(crate) fn write_args(path: &Path, fields: &MetadataFieldSet) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-overwrite_original".into()];
    args.extend(common_args());
    for field in fields.fields() {
        for value in fields.values(field) {
            args.push(format!("-{}={}", field.exiftool_tag(), value).into());
        }
    }
    args.push(path.as_os_str().to_os_string());
    args
}

/// `exiftool -j` の出力（1要素の配列）を解析します。
pub(crate) fn parse_read_output(
    path: &Path,
    stdout: &[u8],
) -> Result<MetadataFieldSet, MetadataError> {
    let json: Value = serde_json::from_slice(stdout).map_err(|e| {
        MetadataError::read(path, format!("exiftool の出力を解析できません: {}", e))
    })?;
    let object = json
        .as_array()
        .and_then(|entries| entries.first())
        .and_then(Value::as_object)
        .ok_or_else(|| MetadataError::read(path, "exiftool の出力が空です"))?;

    let mut fields = MetadataFieldSet::new();
    for field in MetadataField::ALL {
        if let Some(value) = object.get(field.exiftool_tag()) {
            collect_values(&mut fields, field, value);
        }
    }
    Ok(fields)
}

/// タグの値は、文字列・数値、またはそれらの配列のいずれか。
fn collect_values(fields: &mut MetadataFieldSet, field: MetadataField, value: &Value) {
    match value {
        Value::String(s) => fields.insert(field, s),
        Value::Number(n) => fields.insert(field, n.to_string()),
        Value::Bool(b) => fields.insert(field, b.to_string()),
        Value::Array(items) => {
            for item in items {
                collect_values(fields, field, item);
            }
        }
        Value::Null | Value::Object(_) => {}
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exiftool が失敗しました ({})", output.status)
    } else {
        format!("exiftool が失敗しました ({}): {}", output.status, stderr)
    }
}

// --- テストモジュール ---
