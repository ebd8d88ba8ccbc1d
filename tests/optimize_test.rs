//! キーワード最適化の統合テスト

mod common;

use review_rules::error::RulesError;
use review_rules::import::{read_rule_table, read_source_table};
use review_rules::pipeline::{apply_and_save, default_optimize_output, load_optimizer, write_sample};
use review_rules_common::generate_report;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const PAYMENT_EXPANSION: &str = "支付;付款;款项;周期;结算;方式;方法;转账;汇款;支付周期;付款周期;支付条件;付款条件;支付时间;付款时间";

fn write_fixture(path: &std::path::Path) {
    common::write_rule_xlsx(
        path,
        &[
            ["通用合同", "Neutral", "high", "支付方式", "", "", "", ""],
            ["通用合同", "Neutral", "medium", "支付方式 ", "", "", "", ""],
            ["采购", "Neutral", "low", "保密;期限", "", "", "", ""],
            ["通用合同", "Neutral", "high", "违约责任", "违约.*赔偿", "", "", ""],
        ],
    );
}

#[test]
fn test_optimize_in_place() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rules.xlsx");
    write_fixture(&path);

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    let mut table = read_rule_table(&path, 0).expect("読み込み失敗");
    let analysis = optimizer.analyze(&table);

    assert_eq!(analysis.total_rows, 4);
    assert_eq!(analysis.rules_with_keywords, 4);
    let rows: Vec<usize> = analysis.candidates.iter().map(|c| c.row).collect();
    assert_eq!(rows, vec![0, 3]);
    assert!(analysis.candidates[0].suggested_regex.is_some());
    assert!(analysis.candidates[1].suggested_regex.is_none());

    let applied = apply_and_save(&optimizer, &mut table, &analysis.candidates, &path, &path, 0)
        .expect("適用失敗");
    assert!(applied.saved);
    let actions = applied.actions;
    assert_eq!(actions.len(), 2);

    let reloaded = read_rule_table(&path, 0).expect("再読み込み失敗");
    assert_eq!(reloaded.rules[0].keywords, PAYMENT_EXPANSION);
    assert_eq!(reloaded.rules[1].keywords, "支付方式 ");
    assert_eq!(reloaded.rules[2].keywords, "保密;期限");
    assert!(reloaded.rules[3].keywords.starts_with("违约;毁约"));
    assert_eq!(reloaded.rules[3].regex, "违约.*赔偿");
    // 推奨正規表現は表に書き込まない
    assert_eq!(reloaded.rules[0].regex, "");

    let report = generate_report(&actions, analysis.total_rows);
    assert_eq!(report.optimized_count, 2);
    assert_eq!(report.total_count, 4);
    assert!((report.optimized_percentage - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_optimize_is_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("rules.xlsx");
    let output = dir.path().join("optimized.xlsx");
    write_fixture(&input);

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    let mut table = read_rule_table(&input, 0).expect("読み込み失敗");
    let analysis = optimizer.analyze(&table);
    apply_and_save(&optimizer, &mut table, &analysis.candidates, &input, &output, 0)
        .expect("適用失敗");

    // 入力ファイルはそのまま
    let untouched = read_rule_table(&input, 0).expect("読み込み失敗");
    assert_eq!(untouched.rules[0].keywords, "支付方式");

    let mut optimized = read_rule_table(&output, 0).expect("再読み込み失敗");
    let second = optimizer.analyze(&optimized);
    assert!(second.candidates.is_empty());

    // 古い候補をもう一度適用しても変化しない
    let before = std::fs::read(&output).expect("読み込み失敗");
    let applied = apply_and_save(&optimizer, &mut optimized, &analysis.candidates, &output, &output, 0)
        .expect("適用失敗");
    assert!(applied.actions.is_empty());
    assert!(!applied.saved);
    assert_eq!(std::fs::read(&output).expect("読み込み失敗"), before);
}

#[test]
fn test_custom_dictionary_is_merged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let dictionary = dir.path().join("dictionary.json");
    std::fs::write(
        &dictionary,
        r#"{"keywords": {"付款方式": "付款;支付;方式;付款", "支付方式": "支付;付款"}}"#,
    )
    .unwrap();

    let optimizer = load_optimizer(Some(&dictionary)).expect("最適化器の構築失敗");
    assert_eq!(optimizer.expansion_for("付款方式"), Some("付款;支付;方式"));
    assert_eq!(optimizer.expansion_for("支付方式"), Some("支付;付款"));
    assert!(optimizer.expansion_for("保密条款").is_some());
}

#[test]
fn test_sample_table_needs_no_optimization() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sample.xlsx");

    assert_eq!(write_sample(&path).expect("サンプル出力失敗"), 10);

    let table = read_rule_table(&path, 0).expect("読み込み失敗");
    assert_eq!(table.len(), 10);
    assert_eq!(table.rules[0].checklist, "1. 确认付款方式\n2. 明确付款周期\n3. 设定逾期责任");
    assert_eq!(table.rules[2].regex, r"知识产权.*归属");

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    assert!(optimizer.analyze(&table).candidates.is_empty());
}

#[test]
fn test_optimize_csv_in_place() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rules.csv");
    std::fs::write(
        &path,
        "contract_types,party_scope,risk,keywords,regex,checklist,suggest_A,suggest_B\n\
         通用合同,Neutral,high,支付方式,,\"1. 确认付款方式\n2. 明确付款周期\",,\n\
         采购,Neutral,low,保密;期限,,,,\n",
    )
    .unwrap();

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    let mut table = read_rule_table(&path, 0).expect("読み込み失敗");
    let analysis = optimizer.analyze(&table);
    let applied = apply_and_save(&optimizer, &mut table, &analysis.candidates, &path, &path, 0)
        .expect("適用失敗");
    assert_eq!(applied.actions.len(), 1);

    // xlsxではなくCSVとして書き戻される
    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.starts_with(b"PK"));

    let reloaded = read_rule_table(&path, 0).expect("再読み込み失敗");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.rules[0].keywords, PAYMENT_EXPANSION);
    assert_eq!(reloaded.rules[0].checklist, "1. 确认付款方式\n2. 明确付款周期");
    assert_eq!(reloaded.rules[1].keywords, "保密;期限");
}

#[test]
fn test_default_output_for_other_formats_is_xlsx() {
    assert_eq!(default_optimize_output(Path::new("a/rules.csv")), PathBuf::from("a/rules.csv"));
    assert_eq!(default_optimize_output(Path::new("a/rules.xlsx")), PathBuf::from("a/rules.xlsx"));
    assert_eq!(default_optimize_output(Path::new("a/rules.ods")), PathBuf::from("a/rules.xlsx"));
    assert_eq!(default_optimize_output(Path::new("a/rules.xls")), PathBuf::from("a/rules.xlsx"));
}

fn write_two_sheet_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let notes = workbook.add_worksheet();
    notes.set_name("notes").unwrap();
    notes.write_string(0, 0, "keep-me").unwrap();

    let rules = workbook.add_worksheet();
    rules.set_name("rules").unwrap();
    let headers = [
        "contract_types", "party_scope", "risk", "keywords",
        "regex", "checklist", "suggest_A", "suggest_B",
    ];
    for (col, header) in headers.iter().enumerate() {
        rules.write_string(0, col as u16, *header).unwrap();
    }
    rules.write_string(1, 3, "支付方式").unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn test_multi_sheet_workbook_is_not_overwritten() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("book.xlsx");
    write_two_sheet_workbook(&path);
    let before = std::fs::read(&path).unwrap();

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    let mut table = read_rule_table(&path, 1).expect("読み込み失敗");
    let analysis = optimizer.analyze(&table);
    assert_eq!(analysis.candidates.len(), 1);

    let result = apply_and_save(&optimizer, &mut table, &analysis.candidates, &path, &path, 1);
    assert!(matches!(
        result,
        Err(RulesError::InPlaceOverwrite { sheets: 2, sheet_index: 1, .. })
    ));
    assert_eq!(std::fs::read(&path).unwrap(), before);

    // 別の出力先なら保存でき、元のブックは残る
    let output = dir.path().join("optimized.xlsx");
    let applied = apply_and_save(&optimizer, &mut table, &analysis.candidates, &path, &output, 1)
        .expect("適用失敗");
    assert_eq!(applied.actions.len(), 1);
    let notes = read_source_table(&path, 0).expect("読み込み失敗");
    assert_eq!(notes.headers, vec!["keep-me"]);
    assert_eq!(read_rule_table(&output, 0).unwrap().rules[0].keywords, PAYMENT_EXPANSION);
}

#[test]
fn test_no_candidates_still_saves_to_other_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sample.xlsx");
    let output = dir.path().join("copy.xlsx");
    write_sample(&input).expect("サンプル出力失敗");

    let optimizer = load_optimizer(None).expect("最適化器の構築失敗");
    let mut table = read_rule_table(&input, 0).expect("読み込み失敗");
    let analysis = optimizer.analyze(&table);
    assert!(analysis.candidates.is_empty());

    let applied = apply_and_save(&optimizer, &mut table, &analysis.candidates, &input, &output, 0)
        .expect("保存失敗");
    assert!(applied.actions.is_empty());
    assert!(applied.saved);
    assert_eq!(read_rule_table(&output, 0).unwrap().len(), 10);

    let report = generate_report(&applied.actions, analysis.total_rows);
    assert_eq!(report.optimized_count, 0);
    assert_eq!(report.total_count, 10);
}
