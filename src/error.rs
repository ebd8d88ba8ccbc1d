use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力ファイルを読み込めません: {path} ({reason})")]
    SourceUnreadable { path: String, reason: String },

    #[error("対応していないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("複数シートのブックは上書き保存できません: {path}（シート数 {sheets}、対象シート {sheet_index}）。-o で別の出力先を指定してください")]
    InPlaceOverwrite {
        path: String,
        sheets: usize,
        sheet_index: usize,
    },

    #[error("保存に失敗しました: {path} ({reason})")]
    SaveFailure { path: String, reason: String },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] review_rules_common::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
