//! 最適化レポートのJSON出力

use super::write_atomically;
use crate::error::Result;
use chrono::Local;
use review_rules_common::{OptimizationCandidate, OptimizationReport};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportFile<'a> {
    generated_at: String,
    source: String,
    #[serde(flatten)]
    report: &'a OptimizationReport,
    /// 推奨正規表現つきの候補
    candidates: &'a [OptimizationCandidate],
}

/// レポートをJSONで保存
pub fn write_report(
    report: &OptimizationReport,
    candidates: &[OptimizationCandidate],
    source: &Path,
    output_path: &Path,
) -> Result<()> {
    let file = ReportFile {
        generated_at: Local::now().to_rfc3339(),
        source: source.display().to_string(),
        report,
        candidates,
    };

    let json = serde_json::to_string_pretty(&file)?;
    write_atomically(output_path, json.as_bytes())
}
