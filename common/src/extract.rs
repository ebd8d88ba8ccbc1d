//! キーワード・チェックリスト抽出
//!
//! keywords と checklist が両方空のルールに対し、審査コメント列の本文から
//! 固定カタログに基づいて補完する。

use crate::catalog::{matches_any, normalize_header, COMMENTARY_TAGS};
use crate::mapping::ColumnMapping;
use crate::types::{cell, CanonicalRule};
use tracing::debug;

/// 抽出キーワードの上限
pub const KEYWORD_LIMIT: usize = 5;

/// 契約審査の定型キーワード（この順で判定）
pub const KEYWORD_CATALOG: &[&str] = &[
    "付款", "支付", "费用", "价款", "结算",
    "违约", "责任", "赔偿", "违约金",
    "保密", "商业秘密", "机密信息",
    "知识产权", "著作权", "专利权",
    "交付", "验收", "完成", "标准",
    "终止", "解除", "期限",
    "数据", "安全", "隐私", "加密",
    "不可抗力", "天灾",
    "争议", "仲裁", "诉讼", "管辖",
    "沟通", "联系", "报告", "通知",
];

/// チェックリストのトピック
pub struct ChecklistTopic {
    pub name: &'static str,
    /// いずれかを含めば発火
    pub markers: &'static [&'static str],
    /// 追加する番号付き項目
    pub items: [&'static str; 2],
}

/// 判定順のトピック
pub const CHECKLIST_TOPICS: [ChecklistTopic; 5] = [
    ChecklistTopic {
        name: "payment",
        markers: &["付款", "支付"],
        items: ["1. 确认付款方式和周期", "2. 明确逾期付款责任"],
    },
    ChecklistTopic {
        name: "breach",
        markers: &["违约", "责任"],
        items: ["1. 明确违约责任", "2. 设定赔偿标准"],
    },
    ChecklistTopic {
        name: "confidentiality",
        markers: &["保密"],
        items: ["1. 定义保密信息范围", "2. 设定保密期限"],
    },
    ChecklistTopic {
        name: "intellectual_property",
        markers: &["知识产权"],
        items: ["1. 明确知识产权归属", "2. 设定使用许可条款"],
    },
    ChecklistTopic {
        name: "delivery",
        markers: &["交付", "验收"],
        items: ["1. 制定验收标准", "2. 设定验收时限"],
    },
];

/// 本文からキーワードを抽出（カタログ順、最大5件、`;`区切り）
pub fn extract_keywords(content: &str) -> String {
    KEYWORD_CATALOG
        .iter()
        .filter(|keyword| content.contains(*keyword))
        .take(KEYWORD_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join(";")
}

/// 本文からチェックリストを生成（トピック順、改行区切り）
pub fn generate_checklist(content: &str) -> String {
    CHECKLIST_TOPICS
        .iter()
        .filter(|topic| topic.markers.iter().any(|m| content.contains(m)))
        .flat_map(|topic| topic.items)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 審査コメント列の候補（未対応列のうちタグに一致するもの、左から順）
pub fn commentary_columns<S: AsRef<str>>(headers: &[S], mapping: &ColumnMapping) -> Vec<usize> {
    mapping
        .unmapped
        .iter()
        .copied()
        .filter(|&idx| {
            headers
                .get(idx)
                .map(|h| matches_any(&normalize_header(h.as_ref()), COMMENTARY_TAGS))
                .unwrap_or(false)
        })
        .collect()
}

/// 補完が必要か
pub fn needs_enrichment(rule: &CanonicalRule) -> bool {
    rule.keywords.is_empty() && rule.checklist.is_empty()
}

/// ルールを補完する
///
/// 空でない最初のコメント列の本文を使う。何か補完した場合 true。
pub fn enrich_rule(rule: &mut CanonicalRule, row: &[String], commentary: &[usize]) -> bool {
    if !needs_enrichment(rule) {
        return false;
    }

    let content = match commentary
        .iter()
        .map(|&idx| cell(row, idx).trim())
        .find(|text| !text.is_empty())
    {
        Some(text) => text,
        None => return false,
    };

    let keywords = extract_keywords(content);
    let checklist = generate_checklist(content);
    debug!(keywords = %keywords, checklist_lines = checklist.lines().count(), "コメント列から補完");

    let enriched = !keywords.is_empty() || !checklist.is_empty();
    rule.keywords = keywords;
    rule.checklist = checklist;
    enriched
}
