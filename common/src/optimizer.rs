//! ルールキーワード最適化
//!
//! 複合キーワード（「支付方式」など）を、より細かい同義語の集合に展開して
//! 審査エンジンの文字列照合の取りこぼしを減らす。
//!
//! - 照合は完全一致のみ（部分一致・大文字小文字・前後空白の無視はしない）
//! - 展開後の値は辞書キーと一致しないため、再実行しても変化しない

use crate::error::{Error, Result};
use crate::types::{CanonicalField, RuleTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// 推奨正規表現（トリガー語を含むルールに提案する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexRecommendation {
    pub trigger: String,
    pub pattern: String,
}

/// 最適化辞書
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationDictionary {
    /// 複合キーワード → 展開後キーワード（`;`区切り）
    #[serde(default)]
    pub keywords: BTreeMap<String, String>,
    /// 推奨正規表現（先頭から判定）
    #[serde(default)]
    pub regex: Vec<RegexRecommendation>,
}

impl OptimizationDictionary {
    /// 組み込み辞書
    pub fn builtin() -> Self {
        let mut dictionary = Self::default();

        // 支付
        dictionary.insert(
            "支付方式",
            "支付;付款;款项;周期;结算;方式;方法;转账;汇款;支付周期;付款周期;支付条件;付款条件;支付时间;付款时间",
        );
        dictionary.insert("付款条件", "支付;付款;款项;周期;结算;方式;方法;转账;汇款");
        dictionary.insert("支付周期", "支付;付款;款项;周期;结算;日期;时间;天数;月结");

        // 违约
        dictionary.insert("违约责任", "违约;毁约;违反;不履行;责任;赔偿;处罚;罚款;违约金;违约方");
        dictionary.insert("违约条款", "违约;毁约;违反;责任;条款;条件;约定;规定");
        dictionary.insert("违约金", "违约;违约金;赔偿;处罚;罚款;违约方;责任");

        // 保密
        dictionary.insert(
            "保密条款",
            "保密;秘密;机密;隐私;保护;保密期;保密条款;保密信息;秘密信息;机密信息",
        );
        dictionary.insert("保密期限", "保密;秘密;机密;保密期;期限;期间;年;月;日");

        // 知识产权
        dictionary.insert("知识产权", "知识产权;专利;著作权;商标;IP;版权;商业秘密;技术秘密;创新;发明");

        // 终止
        dictionary.insert("合同终止", "终止;解除;中止;终约;解约;提前;合同期;期限;到期;届满");

        dictionary.recommend("支付", r"(支付|付款).*?(\d+).*?(天|个工作日|天内|工作日内)");
        dictionary.recommend("违约", r"(违约|毁约|违反).*?(责任|赔偿|罚款|金额)");
        dictionary.recommend("保密", r"保密.*?(\d+年|\d+个月|期限)");
        dictionary.recommend("期限", r"(\d+).*?(天|个月|年)");

        dictionary
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let dictionary: Self = serde_json::from_str(json)?;
        Ok(dictionary)
    }

    pub fn insert(&mut self, key: &str, expansion: &str) {
        self.keywords.insert(key.to_string(), expansion.to_string());
    }

    /// 推奨正規表現を追加（同じトリガーは置き換え）
    pub fn recommend(&mut self, trigger: &str, pattern: &str) {
        if let Some(existing) = self.regex.iter_mut().find(|r| r.trigger == trigger) {
            existing.pattern = pattern.to_string();
        } else {
            self.regex.push(RegexRecommendation {
                trigger: trigger.to_string(),
                pattern: pattern.to_string(),
            });
        }
    }

    /// 辞書をマージ（後から追加した辞書が優先）
    pub fn merge(&mut self, other: &OptimizationDictionary) {
        self.keywords.extend(other.keywords.clone());
        for recommendation in &other.regex {
            self.recommend(&recommendation.trigger, &recommendation.pattern);
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// 展開後キーワードの重複・空トークンを除去
fn dedupe_tokens(expansion: &str) -> String {
    let mut seen = HashSet::new();
    expansion
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty() && seen.insert(*token))
        .collect::<Vec<_>>()
        .join(";")
}

/// 最適化候補
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationCandidate {
    /// ルール番号（0始まり、ヘッダー行を除く）
    pub row: usize,
    pub risk: String,
    /// 現在の keywords
    pub keywords: String,
    /// 置き換え後の keywords
    pub expansion: String,
    /// 現在の regex
    pub regex: String,
    /// regex が空の場合の推奨正規表現
    pub suggested_regex: Option<String>,
}

/// 分析結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// ルール総数
    pub total_rows: usize,
    /// keywords が空でないルール数
    pub rules_with_keywords: usize,
    pub candidates: Vec<OptimizationCandidate>,
}

/// 適用モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// 表示のみ（変更しない）
    Preview,
    /// 書き換えて変更マーカーを付ける
    Apply,
}

/// 適用した変更
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationAction {
    pub row: usize,
    pub keywords_before: String,
    pub keywords_after: String,
}

/// 適用結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Preview(Vec<OptimizationCandidate>),
    Applied(Vec<OptimizationAction>),
}

impl ApplyOutcome {
    /// 実際に適用した変更（プレビュー時は空）
    pub fn actions(&self) -> &[OptimizationAction] {
        match self {
            ApplyOutcome::Preview(_) => &[],
            ApplyOutcome::Applied(actions) => actions,
        }
    }
}

/// キーワード最適化
///
/// 辞書は構築時に検証され、以後変更されない。
#[derive(Debug, Clone)]
pub struct RuleOptimizer {
    dictionary: OptimizationDictionary,
}

impl RuleOptimizer {
    /// 辞書を検証して構築する
    ///
    /// 空のキー・空の展開、辞書キーと一致する展開はエラー。
    pub fn new(dictionary: OptimizationDictionary) -> Result<Self> {
        let mut normalized = OptimizationDictionary {
            keywords: BTreeMap::new(),
            regex: dictionary.regex,
        };

        for (key, expansion) in dictionary.keywords {
            if key.trim().is_empty() {
                return Err(Error::Config("最適化辞書に空のキーがあります".into()));
            }
            let expansion = dedupe_tokens(&expansion);
            if expansion.is_empty() {
                return Err(Error::Config(format!("「{}」の展開後キーワードが空です", key)));
            }
            normalized.keywords.insert(key, expansion);
        }

        if let Some((key, expansion)) = normalized
            .keywords
            .iter()
            .find(|(_, expansion)| normalized.keywords.contains_key(expansion.as_str()))
        {
            return Err(Error::Config(format!(
                "「{}」の展開後キーワード「{}」が辞書キーと一致します",
                key, expansion
            )));
        }

        Ok(Self { dictionary: normalized })
    }

    /// 組み込み辞書で構築
    pub fn with_builtin() -> Self {
        Self {
            dictionary: OptimizationDictionary::builtin(),
        }
    }

    pub fn dictionary(&self) -> &OptimizationDictionary {
        &self.dictionary
    }

    /// 完全一致で展開後キーワードを取得
    pub fn expansion_for(&self, keywords: &str) -> Option<&str> {
        self.dictionary.keywords.get(keywords).map(|s| s.as_str())
    }

    /// 推奨正規表現（現在のキーワードにトリガーを含む最初のもの）
    fn suggest_regex(&self, keywords: &str) -> Option<String> {
        self.dictionary
            .regex
            .iter()
            .find(|r| keywords.contains(r.trigger.as_str()))
            .map(|r| r.pattern.clone())
    }

    /// ルール表を分析する（変更しない）
    pub fn analyze(&self, table: &RuleTable) -> Analysis {
        let mut analysis = Analysis {
            total_rows: table.len(),
            ..Default::default()
        };

        for (row, rule) in table.rules.iter().enumerate() {
            if rule.keywords.trim().is_empty() {
                continue;
            }
            analysis.rules_with_keywords += 1;

            if let Some(expansion) = self.expansion_for(&rule.keywords) {
                let suggested_regex = if rule.regex.trim().is_empty() {
                    self.suggest_regex(&rule.keywords)
                } else {
                    None
                };

                debug!(row, keywords = %rule.keywords, "最適化候補");
                analysis.candidates.push(OptimizationCandidate {
                    row,
                    risk: rule.risk.clone(),
                    keywords: rule.keywords.clone(),
                    expansion: expansion.to_string(),
                    regex: rule.regex.clone(),
                    suggested_regex,
                });
            }
        }

        info!(
            total = analysis.total_rows,
            candidates = analysis.candidates.len(),
            "ルール分析完了"
        );
        analysis
    }

    /// 候補を適用する
    ///
    /// プレビューでは候補をそのまま返す。適用時は分析時の値のままの行だけを
    /// 書き換えるため、同じ候補で再度呼んでも変化しない。
    pub fn apply(
        &self,
        table: &mut RuleTable,
        candidates: &[OptimizationCandidate],
        mode: ApplyMode,
    ) -> ApplyOutcome {
        if mode == ApplyMode::Preview {
            return ApplyOutcome::Preview(candidates.to_vec());
        }

        let mut actions = Vec::new();

        for candidate in candidates {
            let rule = match table.rules.get_mut(candidate.row) {
                Some(rule) => rule,
                None => continue,
            };
            if rule.keywords != candidate.keywords {
                debug!(row = candidate.row, "分析後に変更された行をスキップ");
                continue;
            }

            let before = std::mem::replace(&mut rule.keywords, candidate.expansion.clone());
            table.mark_changed(candidate.row, CanonicalField::Keywords);

            actions.push(OptimizationAction {
                row: candidate.row,
                keywords_before: before,
                keywords_after: candidate.expansion.clone(),
            });
        }

        info!(applied = actions.len(), "最適化を適用");
        ApplyOutcome::Applied(actions)
    }
}
