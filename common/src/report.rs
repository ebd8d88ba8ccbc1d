//! 最適化レポート
//!
//! 適用済みの変更と総ルール数から統計を算出する。副作用なし。

use crate::optimizer::OptimizationAction;
use serde::{Deserialize, Serialize};

/// 1件の変更の詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDetail {
    pub row: usize,
    pub keywords_before: String,
    pub keywords_after: String,
    pub token_count_before: usize,
    pub token_count_after: usize,
}

impl ActionDetail {
    /// 増えたキーワード数
    pub fn added_tokens(&self) -> isize {
        self.token_count_after as isize - self.token_count_before as isize
    }
}

/// 最適化レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub optimized_count: usize,
    pub total_count: usize,
    /// optimized_count / total_count（0.0〜1.0、総数0なら0.0）
    pub optimized_percentage: f64,
    pub details: Vec<ActionDetail>,
}

/// `;`区切りの空でないトークン数
pub fn count_tokens(keywords: &str) -> usize {
    keywords
        .split(';')
        .filter(|token| !token.trim().is_empty())
        .count()
}

/// レポートを生成する
pub fn generate_report(actions: &[OptimizationAction], total_count: usize) -> OptimizationReport {
    let optimized_count = actions.len();
    let optimized_percentage = if total_count == 0 {
        0.0
    } else {
        optimized_count as f64 / total_count as f64
    };

    let details = actions
        .iter()
        .map(|action| ActionDetail {
            row: action.row,
            keywords_before: action.keywords_before.clone(),
            keywords_after: action.keywords_after.clone(),
            token_count_before: count_tokens(&action.keywords_before),
            token_count_after: count_tokens(&action.keywords_after),
        })
        .collect();

    OptimizationReport {
        optimized_count,
        total_count,
        optimized_percentage,
        details,
    }
}
