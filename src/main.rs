use clap::Parser;
use dialoguer::Confirm;
use review_rules::{cli, config, error, export, import, logging, pipeline};
use review_rules_common::{generate_report, summarize, ApplyMode, ApplyOutcome};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, RulesError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Convert { input, output, sheet } => {
            println!("📋 review-rules - ルール表変換\n");

            let output = output
                .or_else(|| config.rules_output())
                .unwrap_or_else(|| cli::default_rules_output(&input));
            let sheet = sheet.unwrap_or(config.sheet_index);

            println!("[1/1] 変換中: {}", input.display());
            let result = pipeline::convert_file(&input, &output, sheet)?;
            println!("✔ {}件のルールを変換", result.rules.len());
            for (field, column) in result.mapping.bindings() {
                println!("  {} ← 列{}", field, column + 1);
            }
            if !result.enriched_rows.is_empty() {
                println!("  コメント列から補完: {}件", result.enriched_rows.len());
            }

            println!("✔ 保存: {}", output.display());
            println!("\n✅ 変換完了");
        }

        Commands::Optimize { input, output, dictionary, dry_run, yes, report, sheet } => {
            println!("🔧 review-rules - キーワード最適化\n");

            let output = output.unwrap_or_else(|| pipeline::default_optimize_output(&input));
            let sheet = sheet.unwrap_or(config.sheet_index);
            let dictionary = dictionary.or_else(|| config.dictionary.clone());

            // 保存先は分析前に検証する
            pipeline::check_output(&input, &output, sheet)?;

            // 1. 読み込み・分析
            println!("[1/3] ルール表を分析中...");
            let optimizer = pipeline::load_optimizer(dictionary.as_deref())?;
            let mut table = import::read_rule_table(&input, sheet)?;
            let analysis = optimizer.analyze(&table);
            println!(
                "✔ {}件中 キーワードあり{}件、最適化候補{}件\n",
                analysis.total_rows,
                analysis.rules_with_keywords,
                analysis.candidates.len()
            );

            // 2. プレビュー
            if analysis.candidates.is_empty() {
                println!("[2/3] 最適化が必要なルールはありません\n");
            } else {
                println!("[2/3] プレビュー");
                if let ApplyOutcome::Preview(candidates) =
                    optimizer.apply(&mut table, &analysis.candidates, ApplyMode::Preview)
                {
                    for candidate in &candidates {
                        println!("  行{} [{}] {}", candidate.row + 2, candidate.risk, candidate.keywords);
                        println!("    → {}", candidate.expansion);
                        if let Some(regex) = &candidate.suggested_regex {
                            println!("    推奨regex: {}", regex);
                        }
                    }
                }
                println!();
            }

            if dry_run {
                println!("✅ プレビューのみ（保存しません）");
                return Ok(());
            }

            if !yes && !analysis.candidates.is_empty() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("{}件を適用しますか？", analysis.candidates.len()))
                    .default(false)
                    .interact()
                    .map_err(|e| RulesError::Prompt(e.to_string()))?;
                if !confirmed {
                    println!("中止しました");
                    return Ok(());
                }
            }

            // 3. 適用・保存
            println!("[3/3] 適用中...");
            let applied = pipeline::apply_and_save(
                &optimizer,
                &mut table,
                &analysis.candidates,
                &input,
                &output,
                sheet,
            )?;
            let summary = generate_report(&applied.actions, analysis.total_rows);
            println!(
                "✔ {}/{}件を最適化 ({:.1}%)",
                summary.optimized_count,
                summary.total_count,
                summary.optimized_percentage * 100.0
            );
            for detail in &summary.details {
                println!(
                    "  行{}: {} → {}語 (+{})",
                    detail.row + 2,
                    detail.token_count_before,
                    detail.token_count_after,
                    detail.added_tokens()
                );
            }
            if applied.saved {
                println!("✔ 保存: {}", output.display());
            } else {
                println!("- 変更がないため保存しません");
            }

            if let Some(report_path) = report {
                export::write_report(&summary, &analysis.candidates, &input, &report_path)?;
                println!("✔ レポート出力: {}", report_path.display());
            }

            println!("\n✅ 最適化完了");
        }

        Commands::Inspect { input, sheet } => {
            println!("🔍 review-rules - 入力確認\n");

            let sheet = sheet.unwrap_or(config.sheet_index);
            let source = import::read_source_table(&input, sheet)?;
            let summary = summarize(&source);

            println!("行数: {}  列数: {}", summary.row_count, summary.columns.len());
            println!("列:");
            for column in &summary.columns {
                let mark = if summary.commentary_columns.contains(&column.index) {
                    " (コメント列)"
                } else {
                    ""
                };
                println!("  {}. {} [{}件]{}", column.index + 1, column.header, column.filled, mark);
            }

            println!("対応付け:");
            for (field, column) in summary.mapping.bindings() {
                println!("  {} ← 列{}", field, column + 1);
            }
            for field in summary.mapping.unbound_fields() {
                println!("  {} ← (なし)", field);
            }
            println!("キーワード抽出の対象行: {}件", summary.fallback_rows);
        }

        Commands::Sample { output } => {
            let count = pipeline::write_sample(&output)?;
            println!("✔ サンプルルール{}件を出力: {}", count, output.display());
        }

        Commands::Config { set_output, set_dictionary, show } => {
            let mut config = config;

            if let Some(path) = set_output {
                config.set_rules_output(path)?;
                println!("✔ 出力先を設定しました");
            }

            if let Some(path) = set_dictionary {
                config.set_dictionary(path)?;
                println!("✔ 最適化辞書を設定しました");
            }

            if show {
                let unset = "未設定".to_string();
                println!("設定:");
                println!(
                    "  出力先: {}",
                    config.rules_output().map(|p| p.display().to_string()).unwrap_or_else(|| unset.clone())
                );
                println!(
                    "  最適化辞書: {}",
                    config.dictionary.as_ref().map(|p| p.display().to_string()).unwrap_or(unset)
                );
                println!("  シート番号: {}", config.sheet_index);
            }
        }
    }

    Ok(())
}
