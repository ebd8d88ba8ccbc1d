//! Excel生成（共通ライブラリ）
//!
//! 8列のルール表をバッファに生成する。
//! 変更マーカーの付いたセルは黄色で強調表示する。

use crate::error::{Error, Result};
use crate::types::{CanonicalField, RuleTable};
use rust_xlsxwriter::*;

/// シート名
pub const SHEET_NAME: &str = "rules";

/// ルール表全体（ヘッダー込み）を指す名前付き範囲
///
/// 空セルは書き込まないため、読み込み側はこの範囲で行数を復元する。
pub const RULE_RANGE_NAME: &str = "rule_table";

/// 列幅（Excel単位、contract_types〜suggest_B）
const COLUMN_WIDTHS: [f64; 8] = [18.0, 12.0, 10.0, 40.0, 30.0, 40.0, 30.0, 30.0];

/// 強調表示の色
const HIGHLIGHT_COLOR: u32 = 0xFFFF00;

fn excel_error(context: &str, e: XlsxError) -> Error {
    Error::Excel(format!("{}: {}", context, e))
}

/// ルール表をExcelバッファに生成
///
/// 値はすべて文字列として書き込む（数値・数式に変換しない）。
pub fn generate_rules_buffer(table: &RuleTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap();

    let highlight_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_background_color(Color::RGB(HIGHLIGHT_COLOR))
        .set_pattern(FormatPattern::Solid);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| excel_error("シート名設定エラー", e))?;

    for field in CanonicalField::ALL {
        let col = field.column() as u16;
        worksheet
            .set_column_width(col, COLUMN_WIDTHS[field.column()])
            .map_err(|e| excel_error("列幅設定エラー", e))?;
        worksheet
            .write_string_with_format(0, col, field.header(), &header_format)
            .map_err(|e| excel_error("ヘッダー書き込みエラー", e))?;
    }

    for (idx, rule) in table.rules.iter().enumerate() {
        let row = (idx + 1) as u32;

        for field in CanonicalField::ALL {
            let value = rule.get(field);
            let col = field.column() as u16;
            let format = if table.is_marked(idx, field) {
                &highlight_format
            } else {
                &value_format
            };

            // 空セルは書かない（読み込み時に空文字になる）
            if value.is_empty() && !table.is_marked(idx, field) {
                continue;
            }

            worksheet
                .write_string_with_format(row, col, value, format)
                .map_err(|e| excel_error("値書き込みエラー", e))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| excel_error("ウィンドウ枠固定エラー", e))?;

    workbook
        .define_name(RULE_RANGE_NAME, &rule_range(table.len()))
        .map_err(|e| excel_error("名前付き範囲エラー", e))?;

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| excel_error("Excel保存エラー", e))
}

/// `=rules!$A$1:$H$<行数>`
fn rule_range(rule_count: usize) -> String {
    format!("={}!$A$1:$H${}", SHEET_NAME, rule_count + 1)
}
