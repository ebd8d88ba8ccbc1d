//! Excel出力（CLI版）

use super::write_atomically;
use crate::error::Result;
use review_rules_common::export::excel_core::generate_rules_buffer;
use review_rules_common::RuleTable;
use std::path::Path;
use tracing::info;

/// ルール表をxlsxとして保存
///
/// 変更マーカーのあるセルは強調表示される。
pub fn save_xlsx(table: &RuleTable, output_path: &Path) -> Result<()> {
    let buffer = generate_rules_buffer(table)?;
    write_atomically(output_path, &buffer)?;
    info!(path = %output_path.display(), rules = table.len(), "ルール表をxlsxで保存");
    Ok(())
}
