//! GatewayFileService - 公開エントリポイント
//!
//! 起動時に選ばれた FileSource（LocalSource か RemoteSource）に委譲するだけです。
//! スコープの分岐はリクエストごとには評価しません。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ExecutionScope, FileRequest, GatewayError};
use crate::ports::FileSource;

/// GatewayFileService は「ファイルの中身を取得する」唯一の入口
///
/// # 使用例
/// ```ignore
/// let value = service.get_file_contents("config/site.json", false, true).await?;
/// ```
///
/// Clone は安価（Arc の複製）で、複数のタスクから同時に呼び出せます。
#[derive(Clone)]
pub struct GatewayFileService {
    scope: ExecutionScope,
    source: Arc<dyn FileSource>,
}

impl GatewayFileService {
    pub fn new(scope: ExecutionScope, source: Arc<dyn FileSource>) -> Self {
        Self { scope, source }
    }

    /// このサービスが選んだ戦略のスコープ
    pub fn scope(&self) -> ExecutionScope {
        self.scope
    }

    pub async fn get_file_contents(
        &self,
        path: &str,
        force_refresh: bool,
        store_in_cache: bool,
    ) -> Result<Value, GatewayError> {
        let request = FileRequest::new(path)
            .force_refresh(force_refresh)
            .store_in_cache(store_in_cache);
        self.get(request).await
    }

    pub async fn get(&self, request: FileRequest) -> Result<Value, GatewayError> {
        self.source.get_file_contents(request).await
    }
}

impl std::fmt::Debug for GatewayFileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayFileService")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
