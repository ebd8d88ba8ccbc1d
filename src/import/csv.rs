//! CSV読み込み
//!
//! ダブルクォート内のカンマ・改行（checklist の複数行）と `""` エスケープに対応。
//!
//! 空行の扱いはxlsxの範囲と揃える。途中の空行は1行（空セル1つ）として残し、
//! 末尾の空行だけを捨てる。

/// CSV文字列を行・セルに分解する
///
/// 先頭のBOMは除去する。末尾の空行は含めない。
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // 最後の行（末尾に改行がない場合）
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    while rows.last().is_some_and(|row| is_blank_line(row)) {
        rows.pop();
    }

    rows
}

/// 区切りのない空行
fn is_blank_line(row: &[String]) -> bool {
    row.len() == 1 && row[0].is_empty()
}
