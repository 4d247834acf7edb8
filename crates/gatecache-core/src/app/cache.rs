//! ArtifactCache - プロセス共有のファイルキャッシュと無効化ポリシー
//!
//! # 無効化ポリシー
//! 1. パスが存在しなければ NotFound
//! 2. 拡張子から type tag を決める
//! 3. エントリがない、または data が falsy なら強制的に読み直す
//! 4. `mtime > last_modified`（厳密な大なり）、強制、または要求があれば読み直す
//! 5. 読み直し: decoder を引く → 読む → デコード → 保存（info ログ）
//! 6. 読み直し不要ならエントリの data をそのまま返す
//!
//! mtime が同じなら読み直さないので、mtime の分解能が粗いファイルシステムでは
//! その分解能の間だけ古いデータを返すことがあります。
//!
//! # 並行性
//! - パスごとの async Mutex で 3〜5 を直列化する
//! - エントリは `Arc<CacheEntry>` ごと差し替えるので、data と mtime が食い違った
//!   状態は観測されない

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::decode::{DecoderRegistry, type_tag};
use crate::domain::{CacheEntry, GatewayError};
use crate::observability::CacheCounts;
use crate::ports::ModificationClock;

type Slot = Arc<Mutex<Option<Arc<CacheEntry>>>>;

/// ArtifactCache はファイルパスをキーにしたデコード済み artifact のキャッシュ
///
/// 起動時に一つ作り、Arc で全リクエストハンドラに共有します。
/// 明示的な削除はなく、エントリはプロセスが終わるまで残ります。
#[derive(Default)]
pub struct ArtifactCache {
    slots: Mutex<HashMap<String, Slot>>,
    hits: AtomicU64,
    refreshes: AtomicU64,
    uncached_reads: AtomicU64,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュを通してファイルのデコード済みの中身を取得
    pub async fn get(
        &self,
        path: &str,
        force_refresh: bool,
        store_in_cache: bool,
        registry: &DecoderRegistry,
        clock: &dyn ModificationClock,
    ) -> Result<Value, GatewayError> {
        if !clock.exists(path).await {
            return Err(GatewayError::NotFound {
                path: path.to_string(),
            });
        }

        let slot = self.slot(path).await;
        let result = self
            .lookup(path, force_refresh, store_in_cache, registry, clock, &slot)
            .await;
        self.prune(path, slot).await;
        result
    }

    /// パスのロックを取って 3〜6 を実行する
    async fn lookup(
        &self,
        path: &str,
        force_refresh: bool,
        store_in_cache: bool,
        registry: &DecoderRegistry,
        clock: &dyn ModificationClock,
        slot: &Slot,
    ) -> Result<Value, GatewayError> {
        let tag = type_tag(path);
        let mut current = slot.lock().await;

        let modified = clock.mtime(path).await.map_err(|source| GatewayError::Io {
            path: path.to_string(),
            source,
        })?;

        let existing = (*current).clone();
        let healing = existing.as_ref().is_none_or(|entry| entry.is_empty());
        let stale = existing
            .as_ref()
            .is_some_and(|entry| modified > entry.last_modified);

        if let Some(entry) = existing
            && !(healing || stale || force_refresh)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(path, "gateway file served from cache");
            return Ok(entry.data.clone());
        }

        let decoder = registry
            .get(tag)
            .ok_or_else(|| GatewayError::UnsupportedType {
                path: path.to_string(),
                tag: tag.to_string(),
            })?;

        let raw = clock
            .read_all(path)
            .await
            .map_err(|source| GatewayError::Io {
                path: path.to_string(),
                source,
            })?;

        let data = decoder
            .decode(&raw)
            .map_err(|source| GatewayError::Decode {
                path: path.to_string(),
                source,
            })?;

        if !store_in_cache {
            self.uncached_reads.fetch_add(1, Ordering::Relaxed);
            return Ok(data);
        }

        let entry = Arc::new(CacheEntry::new(data, modified));
        *current = Some(Arc::clone(&entry));
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        tracing::info!(path, "updated gateway file in cache");

        Ok(entry.data.clone())
    }

    /// 現在のエントリ（refresh 中なら完了を待つ）
    pub async fn entry(&self, path: &str) -> Option<Arc<CacheEntry>> {
        let slot = self.slots.lock().await.get(path).cloned()?;
        let current = slot.lock().await;
        (*current).clone()
    }

    /// エントリを持つパスの数
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().await.values().cloned().collect();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn counts(&self) -> CacheCounts {
        CacheCounts {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            uncached_reads: self.uncached_reads.load(Ordering::Relaxed),
        }
    }

    /// エントリを持たず、他の誰も使っていない slot を取り除く
    async fn prune(&self, path: &str, slot: Slot) {
        let mut slots = self.slots.lock().await;
        let tracked = slots.get(path).is_some_and(|s| Arc::ptr_eq(s, &slot));
        // map と自分の二つだけが参照していれば、他に待っているタスクはいない
        let vacant = Arc::strong_count(&slot) == 2
            && slot.try_lock().is_ok_and(|current| current.is_none());
        if tracked && vacant {
            slots.remove(path);
        }
    }

    async fn slot(&self, path: &str) -> Slot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(path.to_string()).or_default())
    }
}

impl std::fmt::Debug for ArtifactCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactCache")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("refreshes", &self.refreshes.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
