//! ルール表の型定義
//!
//! - CanonicalField: 出力スキーマの8フィールド（優先順）
//! - CanonicalRule: 審査エンジンが読み込む1ルール
//! - SourceTable: 任意形式の入力シート（ヘッダー＋行）
//! - RuleTable: ルール一覧＋セル単位の変更マーカー

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 出力スキーマのフィールド
///
/// 宣言順がそのまま列順・マッピング優先順になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    #[serde(rename = "contract_types")]
    ContractTypes,
    #[serde(rename = "party_scope")]
    PartyScope,
    #[serde(rename = "risk")]
    Risk,
    #[serde(rename = "keywords")]
    Keywords,
    #[serde(rename = "regex")]
    Regex,
    #[serde(rename = "checklist")]
    Checklist,
    #[serde(rename = "suggest_A")]
    SuggestA,
    #[serde(rename = "suggest_B")]
    SuggestB,
}

impl CanonicalField {
    /// 優先順の全フィールド
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::ContractTypes,
        CanonicalField::PartyScope,
        CanonicalField::Risk,
        CanonicalField::Keywords,
        CanonicalField::Regex,
        CanonicalField::Checklist,
        CanonicalField::SuggestA,
        CanonicalField::SuggestB,
    ];

    /// 出力ファイルのヘッダー名
    pub fn header(&self) -> &'static str {
        match self {
            CanonicalField::ContractTypes => "contract_types",
            CanonicalField::PartyScope => "party_scope",
            CanonicalField::Risk => "risk",
            CanonicalField::Keywords => "keywords",
            CanonicalField::Regex => "regex",
            CanonicalField::Checklist => "checklist",
            CanonicalField::SuggestA => "suggest_A",
            CanonicalField::SuggestB => "suggest_B",
        }
    }

    /// 列番号（0始まり）
    pub fn column(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// 審査ルール（出力の1行）
///
/// 8フィールドは常に存在する（空文字を含む）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalRule {
    pub contract_types: String,   // 合同类型
    pub party_scope: String,      // 适用范围/立场
    pub risk: String,             // 风险等级（そのまま保持）
    pub keywords: String,         // `;`区切り
    pub regex: String,            // 正規表現（検証しない）
    pub checklist: String,        // 改行区切り、番号付き
    #[serde(rename = "suggest_A")]
    pub suggest_a: String,        // 甲方への提案
    #[serde(rename = "suggest_B")]
    pub suggest_b: String,        // 乙方への提案
}

impl CanonicalRule {
    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::ContractTypes => &self.contract_types,
            CanonicalField::PartyScope => &self.party_scope,
            CanonicalField::Risk => &self.risk,
            CanonicalField::Keywords => &self.keywords,
            CanonicalField::Regex => &self.regex,
            CanonicalField::Checklist => &self.checklist,
            CanonicalField::SuggestA => &self.suggest_a,
            CanonicalField::SuggestB => &self.suggest_b,
        }
    }

    pub fn set(&mut self, field: CanonicalField, value: String) {
        let slot = match field {
            CanonicalField::ContractTypes => &mut self.contract_types,
            CanonicalField::PartyScope => &mut self.party_scope,
            CanonicalField::Risk => &mut self.risk,
            CanonicalField::Keywords => &mut self.keywords,
            CanonicalField::Regex => &mut self.regex,
            CanonicalField::Checklist => &mut self.checklist,
            CanonicalField::SuggestA => &mut self.suggest_a,
            CanonicalField::SuggestB => &mut self.suggest_b,
        };
        *slot = value;
    }

    /// 列順の値
    pub fn values(&self) -> [&str; 8] {
        CanonicalField::ALL.map(|field| self.get(field))
    }

    /// 列順の値から構築（不足分は空文字）
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut rule = Self::default();
        for field in CanonicalField::ALL {
            if let Some(value) = values.get(field.column()) {
                rule.set(field, value.as_ref().to_string());
            }
        }
        rule
    }
}

/// 入力シート
///
/// セルはすべて文字列化済み。空セルは空文字。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// 行のセルを取得（列が足りない場合は空文字）
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|s| s.as_str()).unwrap_or("")
}

/// ルール表（最適化対象）
///
/// 変更マーカーは見た目だけの属性で、保存時にセルの強調表示になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    pub rules: Vec<CanonicalRule>,
    marks: BTreeSet<(usize, CanonicalField)>,
}

impl RuleTable {
    pub fn new(rules: Vec<CanonicalRule>) -> Self {
        Self {
            rules,
            marks: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// セルに変更マーカーを付ける
    pub fn mark_changed(&mut self, row: usize, field: CanonicalField) {
        self.marks.insert((row, field));
    }

    pub fn is_marked(&self, row: usize, field: CanonicalField) -> bool {
        self.marks.contains(&(row, field))
    }

    pub fn marked_cells(&self) -> impl Iterator<Item = &(usize, CanonicalField)> {
        self.marks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order() {
        let headers: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(
            headers,
            vec![
                "contract_types", "party_scope", "risk", "keywords",
                "regex", "checklist", "suggest_A", "suggest_B",
            ]
        );
        assert_eq!(CanonicalField::Keywords.column(), 3);
        assert_eq!(CanonicalField::SuggestB.column(), 7);
    }

    #[test]
    fn test_rule_get_set() {
        let mut rule = CanonicalRule::default();
        rule.set(CanonicalField::Keywords, "付款;验收".to_string());
        rule.set(CanonicalField::SuggestA, "建议明确付款周期".to_string());
        assert_eq!(rule.get(CanonicalField::Keywords), "付款;验收");
        assert_eq!(rule.suggest_a, "建议明确付款周期");
        assert_eq!(rule.get(CanonicalField::Risk), "");
    }

    #[test]
    fn test_rule_from_values_short_row() {
        let rule = CanonicalRule::from_values(&["采购合同", "甲方", "高"]);
        assert_eq!(rule.contract_types, "采购合同");
        assert_eq!(rule.risk, "高");
        assert_eq!(rule.keywords, "");
        assert_eq!(rule.values().len(), 8);
    }

    #[test]
    fn test_rule_serialize_uses_header_names() {
        let rule = CanonicalRule {
            suggest_a: "A".to_string(),
            suggest_b: "B".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&rule).expect("シリアライズ失敗");
        assert!(json.contains("\"suggest_A\":\"A\""));
        assert!(json.contains("\"suggest_B\":\"B\""));
        assert!(json.contains("\"contract_types\":\"\""));
    }

    #[test]
    fn test_cell_out_of_range() {
        let row = vec!["a".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 5), "");
    }

    #[test]
    fn test_rule_table_marks() {
        let mut table = RuleTable::new(vec![CanonicalRule::default(); 2]);
        assert!(!table.is_marked(1, CanonicalField::Keywords));
        table.mark_changed(1, CanonicalField::Keywords);
        table.mark_changed(1, CanonicalField::Keywords);
        assert!(table.is_marked(1, CanonicalField::Keywords));
        assert_eq!(table.marked_cells().count(), 1);
    }
}
