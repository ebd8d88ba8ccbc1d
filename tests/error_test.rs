//! エラーケーステスト
//!
//! 入力・保存・設定の各エラーを検証

mod common;

use review_rules::error::RulesError;
use review_rules::export::save_rule_table;
use review_rules::import::{read_rule_table, read_source_table};
use review_rules::pipeline::{convert_file, load_optimizer};
use review_rules_common::{sample_rules, RuleTable};
use std::path::Path;
use tempfile::tempdir;

/// 存在しない入力ファイル
#[test]
fn test_missing_input() {
    let result = read_source_table(Path::new("/nonexistent/path/12345.xlsx"), 0);
    assert!(matches!(result, Err(RulesError::SourceUnreadable { .. })));
}

/// 壊れたxlsx
#[test]
fn test_corrupt_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = read_source_table(&path, 0);
    assert!(matches!(result, Err(RulesError::SourceUnreadable { .. })));
}

/// 対応していない拡張子
#[test]
fn test_unsupported_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rules.docx");
    std::fs::write(&path, b"dummy").unwrap();

    let result = read_rule_table(&path, 0);
    assert!(matches!(result, Err(RulesError::UnsupportedFormat(_))));
}

/// 存在しないシート番号
#[test]
fn test_missing_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rules.xlsx");
    common::write_xlsx(&path, &[vec!["关键词"], vec!["保密"]]);

    let result = read_source_table(&path, 3);
    assert!(matches!(result, Err(RulesError::SourceUnreadable { .. })));
}

/// 読み込みに失敗した場合は出力に触れない
#[test]
fn test_failed_conversion_leaves_output_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("rules.xlsx");
    std::fs::write(&output, b"existing").unwrap();

    let result = convert_file(&dir.path().join("missing.csv"), &output, 0);
    assert!(result.is_err());
    assert_eq!(std::fs::read(&output).unwrap(), b"existing");
}

/// 保存先フォルダがない
#[test]
fn test_save_to_missing_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("missing").join("rules.xlsx");

    let result = save_rule_table(&RuleTable::new(sample_rules()), &output);
    assert!(matches!(result, Err(RulesError::SaveFailure { .. })));
    assert!(!output.exists());
}

/// 辞書キーと一致する展開を持つ辞書
#[test]
fn test_invalid_dictionary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dictionary.json");
    std::fs::write(&path, r#"{"keywords": {"合同期限": "支付方式"}}"#).unwrap();

    let result = load_optimizer(Some(&path));
    assert!(result.is_err());
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("支付方式"), "{}", message);
}

/// JSONとして読めない辞書
#[test]
fn test_unreadable_dictionary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dictionary.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = load_optimizer(Some(&path));
    assert!(matches!(result, Err(RulesError::Config(_))));
}
