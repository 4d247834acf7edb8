//! LocalFileSystem - gateway ホストのファイルシステム（tokio::fs）

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ports::ModificationClock;

/// LocalFileSystem は本番用の ModificationClock
///
/// `root` を指定すると、相対パスは root からの相対として解決します。
/// 絶対パスはそのまま使います。
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    root: Option<PathBuf>,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ModificationClock for LocalFileSystem {
    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }

    async fn mtime(&self, path: &str) -> io::Result<DateTime<Utc>> {
        let modified = tokio::fs::metadata(self.resolve(path)).await?.modified()?;
        Ok(DateTime::<Utc>::from(modified))
    }

    async fn read_all(&self, path: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path)).await
    }
}
