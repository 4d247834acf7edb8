//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **LocalSource / RemoteSource**: FileSource の二つの戦略
//! - **LocalFileSystem**: tokio::fs による ModificationClock
//! - **InMemoryFileSystem**: テスト用の ModificationClock
//! - **InMemoryTransport**: プロセス内の Transport
//! - ScopeResolver（ExecutionScope / GatewayConfig）

pub mod dispatch;
pub mod inmem_transport;
pub mod local_fs;
pub mod memory_fs;
pub mod scope;

// 主要な型を再エクスポート
pub use self::dispatch::{LocalSource, RemoteSource};
pub use self::inmem_transport::InMemoryTransport;
pub use self::local_fs::LocalFileSystem;
pub use self::memory_fs::InMemoryFileSystem;
