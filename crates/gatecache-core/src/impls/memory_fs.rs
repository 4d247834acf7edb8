//! InMemoryFileSystem - 開発・テスト用のファイルシステム
//!
//! # 学習ポイント
//! - mtime を任意に設定できる（時計のずれや同一 mtime の再現）
//! - 読み込み回数を数えられる（キャッシュが効いているかの観測）

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ports::ModificationClock;

#[derive(Debug, Clone)]
struct MemFile {
    contents: Vec<u8>,
    modified: DateTime<Utc>,
}

/// InMemoryFileSystem はメモリ上のファイル表
///
/// # 使用例
/// ```ignore
/// let fs = InMemoryFileSystem::new();
/// fs.write("site.json", r#"{"a":1}"#, Utc::now());
/// assert_eq!(fs.read_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    files: Mutex<HashMap<String, MemFile>>,
    reads: AtomicUsize,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを作成または上書き
    pub fn write(&self, path: &str, contents: impl Into<Vec<u8>>, modified: DateTime<Utc>) {
        let file = MemFile {
            contents: contents.into(),
            modified,
        };
        self.files().insert(path.to_string(), file);
    }

    /// 中身を変えずに mtime だけ変える（存在しなければ何もしない）
    pub fn set_mtime(&self, path: &str, modified: DateTime<Utc>) {
        if let Some(file) = self.files().get_mut(path) {
            file.modified = modified;
        }
    }

    pub fn remove(&self, path: &str) {
        self.files().remove(path);
    }

    /// read_all が呼ばれた回数
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn files(&self) -> std::sync::MutexGuard<'_, HashMap<String, MemFile>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn not_found(path: &str) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
    }
}

#[async_trait]
impl ModificationClock for InMemoryFileSystem {
    async fn exists(&self, path: &str) -> bool {
        self.files().contains_key(path)
    }

    async fn mtime(&self, path: &str) -> io::Result<DateTime<Utc>> {
        self.files()
            .get(path)
            .map(|f| f.modified)
            .ok_or_else(|| Self::not_found(path))
    }

    async fn read_all(&self, path: &str) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let contents = self
            .files()
            .get(path)
            .map(|f| f.contents.clone())
            .ok_or_else(|| Self::not_found(path))?;
        // 並行テストで他のタスクに割り込む機会を作る
        tokio::task::yield_now().await;
        Ok(contents)
    }
}
