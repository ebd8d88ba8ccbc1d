//! ログ初期化
//!
//! ライブラリ側は `tracing` のマクロで記録し、ここで標準エラーに出力する。
//! 既定レベルは warn、`--verbose` で debug。`RUST_LOG` があればそちらを優先。

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    // テストなどで二重に初期化された場合は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
