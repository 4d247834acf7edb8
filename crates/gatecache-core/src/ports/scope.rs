//! ScopeResolver port - 実行コンテキストの判定

use crate::domain::ExecutionScope;

/// ScopeResolver は現在のコンテキストが gateway かどうかを答える
///
/// # 設計原則
/// - 副作用なし、失敗なし
/// - プラットフォームへの問い合わせが失敗するなら、それは起動時の致命的エラー
pub trait ScopeResolver: Send + Sync {
    fn current_scope(&self) -> ExecutionScope;
}
