//! Observability - ログの初期化とキャッシュの状態ビュー

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// ArtifactCache の状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCounts {
    /// エントリを持つパスの数
    pub entries: usize,
    /// 読み直さずに返した回数
    pub hits: u64,
    /// 読み直してキャッシュに保存した回数
    pub refreshes: u64,
    /// store_in_cache=false で読み直した回数
    pub uncached_reads: u64,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TracingInitError(String);

/// tracing subscriber を設定する
///
/// `RUST_LOG` があればそれを、なければ `default_filter` を使います。
pub fn init_tracing(default_filter: &str) -> Result<(), TracingInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| TracingInitError(e.to_string()))
}
