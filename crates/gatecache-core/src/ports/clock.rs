//! ModificationClock port - ファイルの存在確認・mtime・読み込み
//!
//! # 実装
//! - LocalFileSystem（本番用、tokio::fs）
//! - InMemoryFileSystem（テスト用、mtime を自由に設定できる）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io;

/// ModificationClock は gateway のファイルシステムへの窓口
///
/// # テスト容易性
/// - trait によりファイルシステムを差し替え可能
/// - テストでは InMemoryFileSystem で mtime と読み込み回数を観測する
#[async_trait]
pub trait ModificationClock: Send + Sync {
    /// パスが存在するか
    async fn exists(&self, path: &str) -> bool;

    /// 最終更新時刻
    async fn mtime(&self, path: &str) -> io::Result<DateTime<Utc>>;

    /// ファイルの中身をすべて読む
    async fn read_all(&self, path: &str) -> io::Result<Vec<u8>>;
}
