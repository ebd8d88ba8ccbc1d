//! CSV出力
//!
//! UTF-8（BOM付き）。カンマ・引用符・改行を含むセルはダブルクォートで囲む。
//! 強調表示は出力されない。

use super::write_atomically;
use crate::error::Result;
use review_rules_common::{CanonicalField, RuleTable};
use std::path::Path;
use tracing::info;

/// ルール表をCSVとして保存
pub fn save_csv(table: &RuleTable, output_path: &Path) -> Result<()> {
    write_atomically(output_path, render_csv(table).as_bytes())?;
    info!(path = %output_path.display(), rules = table.len(), "ルール表をCSVで保存");
    Ok(())
}

/// ルール表をCSV文字列にする
pub fn render_csv(table: &RuleTable) -> String {
    let mut out = String::from("\u{feff}");

    let header: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.header()).collect();
    push_line(&mut out, &header);

    for rule in &table.rules {
        push_line(&mut out, &rule.values());
    }

    out
}

fn push_line(out: &mut String, values: &[&str]) {
    let line: Vec<String> = values.iter().map(|v| quote_field(v)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
