//! 列タグカタログ
//!
//! 任意のヘッダー名を出力フィールドへ対応付けるための同義語タグ。
//! 配列の順序がマッピングの優先順。

use crate::types::CanonicalField;

/// フィールドと同義語タグの組
#[derive(Debug, Clone, Copy)]
pub struct ColumnTag {
    pub field: CanonicalField,
    /// 部分一致で判定するタグ（小文字）
    pub tags: &'static [&'static str],
}

/// 優先順の列タグ
pub const COLUMN_TAGS: [ColumnTag; 8] = [
    ColumnTag {
        field: CanonicalField::ContractTypes,
        tags: &["合同", "contract", "类型", "type", "种类"],
    },
    ColumnTag {
        field: CanonicalField::PartyScope,
        tags: &["立场", "party", "scope", "范围", "角度"],
    },
    ColumnTag {
        field: CanonicalField::Risk,
        tags: &["风险", "risk", "等级", "level", "严重"],
    },
    ColumnTag {
        field: CanonicalField::Keywords,
        tags: &["关键词", "keyword", "关键字", "匹配"],
    },
    ColumnTag {
        field: CanonicalField::Regex,
        tags: &["正则", "regex", "表达式", "模式"],
    },
    ColumnTag {
        field: CanonicalField::Checklist,
        tags: &["检查", "checklist", "清单", "要点", "项目"],
    },
    ColumnTag {
        field: CanonicalField::SuggestA,
        tags: &["甲方", "a方", "suggest_a", "建议a"],
    },
    ColumnTag {
        field: CanonicalField::SuggestB,
        tags: &["乙方", "b方", "suggest_b", "建议b"],
    },
];

/// 審査コメント列（キーワード抽出の入力）のタグ
pub const COMMENTARY_TAGS: &[&str] = &["意见", "建议", "评审", "review", "comment", "备注"];

/// 汎用契約（contract_types 未対応時）
pub const DEFAULT_CONTRACT_TYPE: &str = "通用合同";
/// 中立（party_scope 未対応時）
pub const DEFAULT_PARTY_SCOPE: &str = "Neutral";
/// 中リスク（risk 未対応時）
pub const DEFAULT_RISK: &str = "medium";

/// ヘッダー正規化（大文字小文字を畳み込む）
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// 正規化済みヘッダーがタグのいずれかを含むか
pub fn matches_any(normalized: &str, tags: &[&str]) -> bool {
    tags.iter().any(|tag| normalized.contains(&tag.to_lowercase()))
}

/// フィールドのタグを取得
pub fn tags_for(field: CanonicalField) -> &'static [&'static str] {
    COLUMN_TAGS
        .iter()
        .find(|tag| tag.field == field)
        .map(|tag| tag.tags)
        .unwrap_or(&[])
}

/// 未対応フィールドの既定値
pub fn default_value(field: CanonicalField) -> &'static str {
    match field {
        CanonicalField::ContractTypes => DEFAULT_CONTRACT_TYPE,
        CanonicalField::PartyScope => DEFAULT_PARTY_SCOPE,
        CanonicalField::Risk => DEFAULT_RISK,
        _ => "",
    }
}
