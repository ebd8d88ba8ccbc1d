//! コマンドごとの処理手順
//!
//! 読み込み → 変換/最適化 → 保存 を組み立てる。表示は main 側で行う。

use crate::error::{Result, RulesError};
use crate::{export, import};
use review_rules_common::{
    convert_table, sample_rules, ApplyMode, ConversionResult, OptimizationAction,
    OptimizationCandidate, OptimizationDictionary, RuleOptimizer, RuleTable,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// 入力表を変換してルール表を保存
pub fn convert_file(input: &Path, output: &Path, sheet_index: usize) -> Result<ConversionResult> {
    check_output(input, output, sheet_index)?;
    let source = import::read_source_table(input, sheet_index)?;
    let result = convert_table(&source);

    let table = RuleTable::new(result.rules.clone());
    export::save_rule_table(&table, output)?;

    Ok(result)
}

/// 最適化器を構築（追加辞書は組み込み辞書に上書きマージ）
pub fn load_optimizer(custom_dictionary: Option<&Path>) -> Result<RuleOptimizer> {
    let path = match custom_dictionary {
        Some(path) => path,
        None => return Ok(RuleOptimizer::with_builtin()),
    };

    let custom = OptimizationDictionary::from_file(path)
        .map_err(|e| RulesError::Config(format!("辞書を読み込めません: {} ({})", path.display(), e)))?;

    let mut dictionary = OptimizationDictionary::builtin();
    dictionary.merge(&custom);
    info!(path = %path.display(), entries = custom.len(), "追加辞書を読み込み");

    Ok(RuleOptimizer::new(dictionary)?)
}

/// 保存先を検証する
///
/// 出力はxlsxかcsvのみ。入力への上書きは、書き戻すと他のシートが失われる
/// 複数シートのブックでは拒否する。
pub fn check_output(input: &Path, output: &Path, sheet_index: usize) -> Result<()> {
    export::output_format(output)?;

    if !same_file(input, output) {
        return Ok(());
    }

    let sheets = import::sheet_count(input)?;
    // 先頭以外のシートを読める場合も必ず複数シート
    if sheets > 1 {
        return Err(RulesError::InPlaceOverwrite {
            path: output.display().to_string(),
            sheets,
            sheet_index,
        });
    }

    Ok(())
}

/// 最適化の既定出力先
///
/// xlsx/csv はそのまま上書き、それ以外の形式は同名の .xlsx。
pub fn default_optimize_output(input: &Path) -> PathBuf {
    if export::output_format(input).is_ok() {
        input.to_path_buf()
    } else {
        input.with_extension("xlsx")
    }
}

/// 適用・保存の結果
#[derive(Debug, Clone, Default)]
pub struct AppliedChanges {
    pub actions: Vec<OptimizationAction>,
    /// 出力ファイルを書き込んだか
    pub saved: bool,
}

/// 候補を適用して保存
///
/// 変更がなく出力先が入力と同じ場合は書き込まない。
/// 出力先が別のファイルなら、候補がなくても保存する。
pub fn apply_and_save(
    optimizer: &RuleOptimizer,
    table: &mut RuleTable,
    candidates: &[OptimizationCandidate],
    input: &Path,
    output: &Path,
    sheet_index: usize,
) -> Result<AppliedChanges> {
    check_output(input, output, sheet_index)?;

    let outcome = optimizer.apply(table, candidates, ApplyMode::Apply);
    let actions = outcome.actions().to_vec();

    if actions.is_empty() && same_file(input, output) {
        info!("変更がないため保存をスキップ");
        return Ok(AppliedChanges { actions, saved: false });
    }

    export::save_rule_table(table, output)?;
    Ok(AppliedChanges { actions, saved: true })
}

/// サンプルルール表を保存し、件数を返す
pub fn write_sample(output: &Path) -> Result<usize> {
    let table = RuleTable::new(sample_rules());
    export::save_rule_table(&table, output)?;
    Ok(table.len())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
