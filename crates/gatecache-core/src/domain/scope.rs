//! ExecutionScope - 実行コンテキストの種別
//!
//! gateway（特権側）だけがファイルシステムに直接アクセスできます。
//! それ以外のコンテキストはリクエストを gateway に転送します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ExecutionScope は現在のプロセスがどちら側で動いているかを表す
///
/// # 特性
/// - 起動時に一度だけ決定される（以降は読み取り専用）
/// - 永続化しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionScope {
    /// ファイルに直接アクセスできる gateway 側
    Privileged,
    /// gateway へ転送する必要がある client 側
    Remote,
}

impl ExecutionScope {
    pub fn is_privileged(self) -> bool {
        matches!(self, ExecutionScope::Privileged)
    }
}

impl fmt::Display for ExecutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionScope::Privileged => f.write_str("privileged"),
            ExecutionScope::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown execution scope '{0}' (expected privileged|gateway|remote|client)")]
pub struct ParseScopeError(pub String);

impl FromStr for ExecutionScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "privileged" | "gateway" => Ok(ExecutionScope::Privileged),
            "remote" | "client" => Ok(ExecutionScope::Remote),
            _ => Err(ParseScopeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::privileged("privileged", ExecutionScope::Privileged)]
    #[case::gateway_alias("gateway", ExecutionScope::Privileged)]
    #[case::remote("remote", ExecutionScope::Remote)]
    #[case::client_alias("Client", ExecutionScope::Remote)]
    #[case::padded("  remote\n", ExecutionScope::Remote)]
    fn parses_known_scopes(#[case] raw: &str, #[case] expected: ExecutionScope) {
        assert_eq!(raw.parse::<ExecutionScope>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_scope() {
        let err = "designer".parse::<ExecutionScope>().unwrap_err();
        assert!(err.to_string().contains("designer"));
    }

    #[test]
    fn display_matches_parse() {
        for scope in [ExecutionScope::Privileged, ExecutionScope::Remote] {
            assert_eq!(scope.to_string().parse::<ExecutionScope>().unwrap(), scope);
        }
    }
}
