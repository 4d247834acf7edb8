//! ScopeResolver の実装
//!
//! スコープは起動時に一度だけ決まるので、値そのものを resolver として使えます。

use crate::config::GatewayConfig;
use crate::domain::ExecutionScope;
use crate::ports::ScopeResolver;

impl ScopeResolver for ExecutionScope {
    fn current_scope(&self) -> ExecutionScope {
        *self
    }
}

/// 環境変数から読んだ設定をそのまま resolver として使う
impl ScopeResolver for GatewayConfig {
    fn current_scope(&self) -> ExecutionScope {
        self.scope
    }
}
