//! ファイル出力
//!
//! 保存先と同じフォルダに一時ファイルを書き、完了後に置き換える。
//! 失敗時は既存のファイルに触れない。

pub mod csv;
pub mod excel;
pub mod report;

use crate::error::{Result, RulesError};
use review_rules_common::RuleTable;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub use report::write_report;

/// ルール表の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

/// 保存先の拡張子から出力形式を決める（xlsx/csv 以外はエラー）
pub fn output_format(path: &Path) -> Result<OutputFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => Ok(OutputFormat::Xlsx),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(RulesError::UnsupportedFormat(format!(
            "{}（出力はxlsx/csv）",
            path.display()
        ))),
    }
}

/// ルール表を保存先の形式で保存
pub fn save_rule_table(table: &RuleTable, output_path: &Path) -> Result<()> {
    match output_format(output_path)? {
        OutputFormat::Xlsx => excel::save_xlsx(table, output_path),
        OutputFormat::Csv => csv::save_csv(table, output_path),
    }
}

/// バイト列を保存先へ原子的に書き込む
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(save_failure(
            path,
            format!("保存先フォルダが存在しません: {}", parent.display()),
        ));
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| save_failure(path, e.to_string()))?;
    temp.write_all(bytes)
        .map_err(|e| save_failure(path, e.to_string()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| save_failure(path, e.to_string()))?;
    temp.persist(path)
        .map_err(|e| save_failure(path, e.error.to_string()))?;

    Ok(())
}

fn save_failure(path: &Path, reason: String) -> RulesError {
    RulesError::SaveFailure {
        path: path.display().to_string(),
        reason,
    }
}
