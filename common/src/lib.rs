//! Review Rules Common Library
//!
//! 審査ルール表の列マッピング・行変換・キーワード補完・キーワード最適化。
//! ファイル入出力とCLIは含まない。

pub mod types;
pub mod catalog;
pub mod mapping;
pub mod transcode;
pub mod extract;
pub mod optimizer;
pub mod report;
pub mod sample;
pub mod summary;
pub mod error;
pub mod export;

pub use types::{CanonicalField, CanonicalRule, RuleTable, SourceTable};
pub use mapping::{map_columns, ColumnMapping};
pub use transcode::{convert_table, transcode_row, ConversionResult};
pub use extract::{extract_keywords, generate_checklist};
pub use optimizer::{
    Analysis, ApplyMode, ApplyOutcome, OptimizationAction, OptimizationCandidate,
    OptimizationDictionary, RuleOptimizer,
};
pub use report::{generate_report, OptimizationReport};
pub use sample::sample_rules;
pub use summary::{summarize, SourceSummary};
pub use error::{Error, Result};
