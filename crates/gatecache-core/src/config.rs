//! GatewayConfig - 環境変数からの設定
//!
//! | 変数 | 意味 | 既定値 |
//! |---|---|---|
//! | `GATECACHE_PROJECT` | 転送先の peer 名 | `gatecache` |
//! | `GATECACHE_SCOPE` | `privileged` / `gateway` / `remote` / `client` | `privileged` |
//! | `GATECACHE_ROOT` | 相対パスの基準ディレクトリ | なし（カレントディレクトリ） |
//! | `RUST_LOG` | ログフィルタ | `info` |

use std::path::PathBuf;

use crate::app::DEFAULT_PROJECT;
use crate::domain::{ExecutionScope, ParseScopeError};

pub const PROJECT_VAR: &str = "GATECACHE_PROJECT";
pub const SCOPE_VAR: &str = "GATECACHE_SCOPE";
pub const ROOT_VAR: &str = "GATECACHE_ROOT";
pub const LOG_VAR: &str = "RUST_LOG";

/// 起動時に一度だけ読む設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub project: String,
    pub scope: ExecutionScope,
    pub root: Option<PathBuf>,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid GATECACHE_SCOPE: {0}")]
    InvalidScope(#[from] ParseScopeError),
}

impl GatewayConfig {
    /// プロセスの環境変数から読む
    ///
    /// スコープが解釈できなければ起動時の致命的エラーです。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の lookup 関数から読む（テストで環境変数を書き換えずに済む）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let scope = match non_empty(SCOPE_VAR) {
            Some(raw) => raw.parse()?,
            None => ExecutionScope::Privileged,
        };

        Ok(Self {
            project: non_empty(PROJECT_VAR).unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            scope,
            root: non_empty(ROOT_VAR).map(PathBuf::from),
            log_filter: non_empty(LOG_VAR).unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            scope: ExecutionScope::Privileged,
            root: None,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = GatewayConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (PROJECT_VAR, "plant"),
            (SCOPE_VAR, "client"),
            (ROOT_VAR, "/opt/ignition/data"),
            (LOG_VAR, "gatecache_core=debug"),
        ]))
        .unwrap();

        assert_eq!(config.project, "plant");
        assert_eq!(config.scope, ExecutionScope::Remote);
        assert_eq!(config.root, Some(PathBuf::from("/opt/ignition/data")));
        assert_eq!(config.log_filter, "gatecache_core=debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = GatewayConfig::from_lookup(lookup_from(&[(PROJECT_VAR, "  "), (SCOPE_VAR, "")]))
            .unwrap();
        assert_eq!(config.project, DEFAULT_PROJECT);
        assert_eq!(config.scope, ExecutionScope::Privileged);
    }

    #[test]
    fn invalid_scope_is_fatal() {
        let result = GatewayConfig::from_lookup(lookup_from(&[(SCOPE_VAR, "designer")]));
        assert!(matches!(result, Err(ConfigError::InvalidScope(_))));
    }
}
