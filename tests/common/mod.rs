//! テスト用のフィクスチャ生成

#![allow(dead_code)]

use review_rules_common::CanonicalField;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// 文字列セルだけのxlsxを作成（1行目がヘッダー）
pub fn write_xlsx(path: &Path, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("セル書き込み失敗");
            }
        }
    }
    workbook.save(path).expect("xlsx保存失敗");
}

/// 標準8列のルール表を作成
pub fn write_rule_xlsx(path: &Path, rules: &[[&str; 8]]) {
    let header: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.header()).collect();
    let mut rows = vec![header];
    rows.extend(rules.iter().map(|rule| rule.to_vec()));
    write_xlsx(path, &rows);
}
