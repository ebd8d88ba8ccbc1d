//! 入力ファイル読み込み
//!
//! xlsx/xlsm/xlsb/xls/ods は calamine、csv は独自パーサーで読む。
//! セルはすべて文字列として扱い、数値への変換はしない。

pub mod csv;

use crate::error::{Result, RulesError};
use calamine::{open_workbook_auto, Data, Reader};
use review_rules_common::export::excel_core::RULE_RANGE_NAME;
use review_rules_common::{CanonicalField, CanonicalRule, RuleTable, SourceTable};
use std::path::Path;
use tracing::{debug, warn};

/// calamine で読める拡張子
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 入力シートを読み込む（1行目がヘッダー）
pub fn read_source_table(path: &Path, sheet_index: usize) -> Result<SourceTable> {
    let mut grid = read_grid(path, sheet_index)?;
    if grid.is_empty() {
        return Err(unreadable(path, "シートが空です"));
    }

    let headers = grid.remove(0);
    debug!(columns = headers.len(), rows = grid.len(), "入力シート読み込み");
    Ok(SourceTable::new(headers, grid))
}

/// 8列のルール表を読み込む
///
/// 列は位置で対応付ける。ヘッダーが標準と異なる場合は警告のみ。
/// セルの値はトリムしない。
pub fn read_rule_table(path: &Path, sheet_index: usize) -> Result<RuleTable> {
    let mut grid = read_grid(path, sheet_index)?;
    if grid.is_empty() {
        return Err(unreadable(path, "シートが空です"));
    }

    let headers = grid.remove(0);
    let expected = CanonicalField::ALL.map(|field| field.header());
    let matches = expected
        .iter()
        .enumerate()
        .all(|(i, name)| headers.get(i).map(|h| h.trim()) == Some(*name));
    if !matches {
        warn!(
            path = %path.display(),
            headers = ?headers,
            "ヘッダーが標準の8列と異なります。列の位置で読み込みます"
        );
    }

    let rules: Vec<CanonicalRule> = grid
        .iter()
        .map(|row| CanonicalRule::from_values(&row[..]))
        .collect();
    debug!(rules = rules.len(), "ルール表読み込み");
    Ok(RuleTable::new(rules))
}

fn read_grid(path: &Path, sheet_index: usize) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(unreadable(path, "ファイルが見つかりません"));
    }

    let extension = extension_of(path);

    if extension == "csv" {
        let content =
            std::fs::read_to_string(path).map_err(|e| unreadable(path, &e.to_string()))?;
        return Ok(csv::parse_csv(&content));
    }

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return read_workbook_grid(path, sheet_index);
    }

    Err(RulesError::UnsupportedFormat(format!(
        "{}（入力はxlsx/xlsm/xlsb/xls/ods/csv）",
        path.display()
    )))
}

/// ブックのシート数（csvは1）
pub fn sheet_count(path: &Path) -> Result<usize> {
    if extension_of(path) == "csv" {
        return Ok(1);
    }

    let workbook = open_workbook_auto(path).map_err(|e| unreadable(path, &e.to_string()))?;
    Ok(workbook.sheet_names().len())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

fn read_workbook_grid(path: &Path, sheet_index: usize) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, &e.to_string()))?;

    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| unreadable(path, &format!("シート{}がありません", sheet_index)))?
        .map_err(|e| unreadable(path, &e.to_string()))?;

    // Range は最初の使用セルから始まるため、絶対位置で取り出す
    let mut grid: Vec<Vec<String>> = match range.end() {
        Some((last_row, last_col)) => (0..=last_row)
            .map(|row| {
                (0..=last_col)
                    .map(|col| range.get_value((row, col)).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect(),
        None => Vec::new(),
    };

    // 空セルは範囲に含まれないため、宣言された行数まで空行を補う
    let declared = workbook
        .sheet_names()
        .get(sheet_index)
        .and_then(|sheet| declared_row_count(workbook.defined_names(), sheet));
    if let Some(rows) = declared {
        let width = grid.first().map(|r| r.len()).unwrap_or(CanonicalField::ALL.len());
        if grid.len() < rows {
            debug!(read = grid.len(), declared = rows, "末尾の空行を補完");
            grid.resize(rows, vec![String::new(); width]);
        }
    }

    Ok(grid)
}

/// ルール表の名前付き範囲から行数（ヘッダー込み）を取得
fn declared_row_count(names: &[(String, String)], sheet: &str) -> Option<usize> {
    names
        .iter()
        .find(|(name, _)| name == RULE_RANGE_NAME)
        .and_then(|(_, reference)| range_end_row(reference, sheet))
}

/// `rules!$A$1:$H$5` 形式の参照から終端行を取り出す
fn range_end_row(reference: &str, sheet: &str) -> Option<usize> {
    let (target, cells) = reference.trim_start_matches('=').rsplit_once('!')?;
    if target.trim_matches('\'') != sheet {
        return None;
    }

    let end = cells.rsplit(':').next()?;
    let digits: String = end.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// セルを文字列化
fn render_cell(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => render_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => {
            warn!(error = ?e, "エラー値のセルを空として扱います");
            String::new()
        }
        other => other.to_string(),
    }
}

/// 整数値の浮動小数点は小数点なしで表示
fn render_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn unreadable(path: &Path, reason: &str) -> RulesError {
    RulesError::SourceUnreadable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
