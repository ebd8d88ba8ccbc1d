use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "review-rules")]
#[command(about = "契約審査ルール表の変換・キーワード最適化ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 任意の列構成の表を標準8列のルール表に変換
    Convert {
        /// 入力ファイル（xlsx/xlsm/xlsb/xls/ods/csv）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先 xlsx/csv（デフォルト: 設定値 → 入力名_rules.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// シート番号（0始まり）
        #[arg(short, long)]
        sheet: Option<usize>,
    },

    /// ルール表のキーワードを辞書で細分化
    Optimize {
        /// ルール表（8列）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先 xlsx/csv（デフォルト: xlsx/csvは入力を上書き、その他の形式は同名の.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 追加の最適化辞書（JSON）
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// プレビューのみ（保存しない）
        #[arg(long)]
        dry_run: bool,

        /// 確認せずに適用
        #[arg(short, long)]
        yes: bool,

        /// レポートJSONの出力先
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// シート番号（0始まり）
        #[arg(short, long)]
        sheet: Option<usize>,
    },

    /// 入力表の列構成と対応付けを確認
    Inspect {
        /// 入力ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// シート番号（0始まり）
        #[arg(short, long)]
        sheet: Option<usize>,
    },

    /// サンプルルール表を生成
    Sample {
        /// 出力先 xlsx/csv
        #[arg(short, long, default_value = "sample_rules.xlsx")]
        output: PathBuf,
    },

    /// 設定
    Config {
        /// 出力先を設定
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// 最適化辞書を設定
        #[arg(long)]
        set_dictionary: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// convert の既定出力先（入力名_rules.xlsx）
pub fn default_rules_output(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rules");
    input.with_file_name(format!("{}_rules.xlsx", stem))
}
