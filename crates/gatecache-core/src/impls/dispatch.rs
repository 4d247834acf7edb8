//! LocalSource / RemoteSource - get_file_contents の二つの戦略
//!
//! 起動時に ExecutionScope を見てどちらか一方を選び、GatewayFileService に注入します。
//! - **LocalSource**: gateway 上で ArtifactCache を引く
//! - **RemoteSource**: リクエストを gateway の handler へ転送する

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::cache::ArtifactCache;
use crate::app::handler::GET_FILE_CONTENTS;
use crate::decode::DecoderRegistry;
use crate::domain::{FileRequest, GatewayError, TransportError};
use crate::ports::{FileSource, ModificationClock, Transport};

/// LocalSource は gateway（特権側）の戦略
pub struct LocalSource {
    cache: Arc<ArtifactCache>,
    registry: Arc<DecoderRegistry>,
    clock: Arc<dyn ModificationClock>,
}

impl LocalSource {
    pub fn new(
        cache: Arc<ArtifactCache>,
        registry: Arc<DecoderRegistry>,
        clock: Arc<dyn ModificationClock>,
    ) -> Self {
        Self {
            cache,
            registry,
            clock,
        }
    }

    pub fn cache(&self) -> &Arc<ArtifactCache> {
        &self.cache
    }
}

#[async_trait]
impl FileSource for LocalSource {
    async fn get_file_contents(&self, request: FileRequest) -> Result<Value, GatewayError> {
        self.cache
            .get(
                &request.file_path,
                request.force_refresh,
                request.store_in_cache,
                &self.registry,
                self.clock.as_ref(),
            )
            .await
    }
}

/// RemoteSource は client 側の戦略
///
/// リクエストを JSON にして `project` の `getGatewayFileContents` handler に送り、
/// 返ってきた結果をそのまま返します。ローカルのキャッシュには触りません。
pub struct RemoteSource {
    project: String,
    transport: Arc<dyn Transport>,
}

impl RemoteSource {
    pub fn new(project: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            project: project.into(),
            transport,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }
}

#[async_trait]
impl FileSource for RemoteSource {
    async fn get_file_contents(&self, request: FileRequest) -> Result<Value, GatewayError> {
        let payload = serde_json::to_value(&request).map_err(|e| GatewayError::Dispatch {
            project: self.project.clone(),
            source: TransportError::Encode(e),
        })?;

        tracing::debug!(
            project = %self.project,
            path = %request.file_path,
            "forwarding file request to gateway"
        );
        self.transport
            .send_request(&self.project, GET_FILE_CONTENTS, payload)
            .await
    }
}
