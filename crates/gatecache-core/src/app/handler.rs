//! Inbound RPC - gateway 側で client からのリクエストを受ける handler
//!
//! handler 名 `getGatewayFileContents` で登録し、
//! `{file_path, force_refresh?, store_in_cache?}` を受け取ります。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FileRequest, GatewayError};
use crate::impls::LocalSource;
use crate::ports::FileSource;

/// client からのファイル取得リクエストを受ける handler 名
pub const GET_FILE_CONTENTS: &str = "getGatewayFileContents";

/// RequestHandler は transport から届いた payload を処理する
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, payload: Value) -> Result<Value, GatewayError>;
}

/// GetFileContentsHandler は payload を FileRequest にして gateway のキャッシュを引く
///
/// LocalSource しか受け取らないので、ここから先へ転送されることはありません。
#[derive(Clone)]
pub struct GetFileContentsHandler {
    source: Arc<LocalSource>,
}

impl GetFileContentsHandler {
    pub fn new(source: Arc<LocalSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl RequestHandler for GetFileContentsHandler {
    async fn handle(&self, payload: Value) -> Result<Value, GatewayError> {
        let request: FileRequest = serde_json::from_value(payload)
            .map_err(|e| GatewayError::InvalidRequest(format!("json decode: {e}")))?;
        self.source.get_file_contents(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppBuilder;
    use crate::domain::ExecutionScope;
    use crate::impls::{InMemoryFileSystem, InMemoryTransport};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn gateway_handler(fs: Arc<InMemoryFileSystem>) -> GetFileContentsHandler {
        let gateway = AppBuilder::new()
            .clock(fs)
            .build(&ExecutionScope::Privileged)
            .unwrap();
        gateway.handler().unwrap()
    }

    #[tokio::test]
    async fn handles_payload_with_defaults() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.write("a.json", r#"{"a":1}"#, Utc.timestamp_opt(1, 0).unwrap());
        let handler = gateway_handler(fs);

        let value = handler.handle(json!({ "file_path": "a.json" })).await.unwrap();
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[tokio::test]
    async fn rejects_payload_without_path() {
        let handler = gateway_handler(Arc::new(InMemoryFileSystem::new()));

        let err = handler.handle(json!({ "force_refresh": true })).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let handler = gateway_handler(Arc::new(InMemoryFileSystem::new()));

        let err = handler
            .handle(json!({ "file_path": "gone.json" }))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remote_gateway_has_no_handler() {
        let client = AppBuilder::new()
            .project("plant")
            .transport(Arc::new(InMemoryTransport::new()))
            .build(&ExecutionScope::Remote)
            .unwrap();
        assert!(client.handler().is_none());
    }

    #[tokio::test]
    async fn handler_serves_locally_even_when_gateway_is_shared() {
        let fs = Arc::new(InMemoryFileSystem::new());
        fs.write("a.json", r#"{"a":1}"#, Utc.timestamp_opt(1, 0).unwrap());
        let gateway = AppBuilder::new()
            .project("plant")
            .clock(fs.clone())
            .build(&ExecutionScope::Privileged)
            .unwrap();
        let handler = gateway.handler().unwrap();

        handler.handle(json!({ "file_path": "a.json" })).await.unwrap();

        let cache = gateway.cache().unwrap();
        assert_eq!(cache.entry("a.json").await.unwrap().data, json!({ "a": 1 }));
        assert_eq!(fs.read_count(), 1);
    }
}
