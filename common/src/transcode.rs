//! 行変換
//!
//! 列マッピングを各行に適用して審査ルールを生成する。
//!
//! ## 処理フロー
//! 1. ヘッダーから列マッピングを解決
//! 2. 対応列の値をトリムして格納、未対応フィールドは既定値
//! 3. keywords・checklist が両方空なら審査コメント列から補完

use crate::catalog::default_value;
use crate::extract::{commentary_columns, enrich_rule};
use crate::mapping::{map_columns, ColumnMapping};
use crate::types::{cell, CanonicalField, CanonicalRule, SourceTable};
use tracing::{info, warn};

/// 変換結果
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// 入力と同じ順序のルール
    pub rules: Vec<CanonicalRule>,
    /// 使用した列マッピング
    pub mapping: ColumnMapping,
    /// 補完に使ったコメント列
    pub commentary_columns: Vec<usize>,
    /// コメント列から補完した行番号（0始まり）
    pub enriched_rows: Vec<usize>,
}

/// 1行を変換する
pub fn transcode_row(row: &[String], mapping: &ColumnMapping) -> CanonicalRule {
    let mut rule = CanonicalRule::default();

    for field in CanonicalField::ALL {
        let value = match mapping.column_for(field) {
            Some(column) => cell(row, column).trim().to_string(),
            None => default_value(field).to_string(),
        };
        rule.set(field, value);
    }

    rule
}

/// 入力シート全体を変換する
///
/// 行は一切落とさない（空行も1ルールになる）。
pub fn convert_table(table: &SourceTable) -> ConversionResult {
    let mapping = map_columns(&table.headers);
    let commentary = commentary_columns(&table.headers, &mapping);
    info!(
        bound = mapping.len(),
        unmapped = mapping.unmapped.len(),
        commentary = commentary.len(),
        "列マッピング解決"
    );

    let risk_column = mapping.column_for(CanonicalField::Risk);
    let mut rules = Vec::with_capacity(table.rows.len());
    let mut enriched_rows = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        let mut rule = transcode_row(row, &mapping);

        if risk_column.is_some() && rule.risk.is_empty() {
            warn!(row = idx, "risk 列が空です（審査エンジンで読み飛ばされます）");
        }

        if enrich_rule(&mut rule, row, &commentary) {
            enriched_rows.push(idx);
        }

        rules.push(rule);
    }

    info!(rules = rules.len(), enriched = enriched_rows.len(), "変換完了");

    ConversionResult {
        rules,
        mapping,
        commentary_columns: commentary,
        enriched_rows,
    }
}
