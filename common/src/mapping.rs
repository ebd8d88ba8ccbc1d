//! 列マッピング
//!
//! 入力ヘッダーを出力フィールドへ対応付ける。
//! フィールド優先順に、未使用の列を左から走査して最初に一致した列を採用する。

use crate::catalog::{matches_any, normalize_header, COLUMN_TAGS};
use crate::types::CanonicalField;
use std::collections::BTreeMap;
use tracing::debug;

/// フィールド → 入力列番号の部分写像
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    bindings: BTreeMap<CanonicalField, usize>,
    /// どのフィールドにも使われなかった列
    pub unmapped: Vec<usize>,
}

impl ColumnMapping {
    /// フィールドに対応する列番号
    pub fn column_for(&self, field: CanonicalField) -> Option<usize> {
        self.bindings.get(&field).copied()
    }

    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    /// 対応済みの組（フィールド優先順）
    pub fn bindings(&self) -> impl Iterator<Item = (CanonicalField, usize)> + '_ {
        self.bindings.iter().map(|(field, column)| (*field, *column))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 未対応フィールド
    pub fn unbound_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.is_bound(*field))
            .collect()
    }
}

/// ヘッダー一覧から列マッピングを解決する
///
/// 部分的なマッピングはエラーではない。同じ入力には常に同じ結果を返す。
pub fn map_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect();
    let mut consumed = vec![false; normalized.len()];
    let mut bindings = BTreeMap::new();

    for tag in COLUMN_TAGS.iter() {
        let found = normalized
            .iter()
            .enumerate()
            .find(|(idx, header)| !consumed[*idx] && matches_any(header, tag.tags));

        if let Some((idx, _)) = found {
            consumed[idx] = true;
            bindings.insert(tag.field, idx);
            debug!(field = %tag.field, column = idx, header = headers[idx].as_ref(), "列を対応付け");
        }
    }

    let unmapped: Vec<usize> = consumed
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(idx, _)| idx)
        .collect();

    ColumnMapping { bindings, unmapped }
}
