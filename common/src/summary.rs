//! 入力シートの構造分析
//!
//! 変換前にヘッダー・空でないセル数・列マッピングを確認するための集計。

use crate::extract::{commentary_columns, needs_enrichment};
use crate::mapping::{map_columns, ColumnMapping};
use crate::transcode::transcode_row;
use crate::types::{cell, SourceTable};

/// 列ごとの集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub index: usize,
    pub header: String,
    /// 空でないセル数
    pub filled: usize,
}

/// シート全体の集計
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub mapping: ColumnMapping,
    pub commentary_columns: Vec<usize>,
    /// キーワード抽出に回る行数
    pub fallback_rows: usize,
}

/// 入力シートを集計する
pub fn summarize(table: &SourceTable) -> SourceSummary {
    let mapping = map_columns(&table.headers);
    let commentary = commentary_columns(&table.headers, &mapping);

    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| ColumnSummary {
            index,
            header: header.clone(),
            filled: table
                .rows
                .iter()
                .filter(|row| !cell(row, index).trim().is_empty())
                .count(),
        })
        .collect();

    let fallback_rows = table
        .rows
        .iter()
        .filter(|row| needs_enrichment(&transcode_row(row, &mapping)))
        .count();

    SourceSummary {
        row_count: table.row_count(),
        columns,
        mapping,
        commentary_columns: commentary,
        fallback_rows,
    }
}
