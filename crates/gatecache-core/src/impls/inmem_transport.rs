//! InMemoryTransport - プロセス内の request/response チャネル
//!
//! # 学習ポイント
//! - (project, handler 名) → handler の二段 HashMap
//! - peer のエラーは ErrorReply を経由して返す（実際のワイヤーと同じく kind だけが残る）

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::handler::RequestHandler;
use crate::domain::{GatewayError, TransportError};
use crate::ports::Transport;

/// InMemoryTransport は開発・デモ用の Transport
///
/// # 使用例
/// ```ignore
/// let mut transport = InMemoryTransport::new();
/// if let Some(handler) = gateway.handler() {
///     transport.register("plant", GET_FILE_CONTENTS, Arc::new(handler));
/// }
/// let client = RemoteSource::new("plant", Arc::new(transport));
/// ```
#[derive(Default)]
pub struct InMemoryTransport {
    peers: HashMap<String, HashMap<String, Arc<dyn RequestHandler>>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// project に handler を登録（同名があれば上書き）
    pub fn register(
        &mut self,
        project: impl Into<String>,
        handler_name: impl Into<String>,
        handler: Arc<dyn RequestHandler>,
    ) {
        self.peers
            .entry(project.into())
            .or_default()
            .insert(handler_name.into(), handler);
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send_request(
        &self,
        project: &str,
        handler: &str,
        payload: Value,
    ) -> Result<Value, GatewayError> {
        let dispatch_error = |source: TransportError| GatewayError::Dispatch {
            project: project.to_string(),
            source,
        };

        let peer = self
            .peers
            .get(project)
            .ok_or_else(|| dispatch_error(TransportError::NoPeer(project.to_string())))?;
        let target = peer.get(handler).ok_or_else(|| {
            dispatch_error(TransportError::NoHandler {
                project: project.to_string(),
                handler: handler.to_string(),
            })
        })?;

        target
            .handle(payload)
            .await
            .map_err(|e| GatewayError::from_reply(e.to_reply()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl RequestHandler for Echo {
        async fn handle(&self, payload: Value) -> Result<Value, GatewayError> {
            Ok(payload)
        }
    }

    struct Missing;

    #[async_trait]
    impl RequestHandler for Missing {
        async fn handle(&self, _payload: Value) -> Result<Value, GatewayError> {
            Err(GatewayError::NotFound {
                path: "gone.json".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn routes_to_registered_handler() {
        let mut transport = InMemoryTransport::new();
        transport.register("plant", "echo", Arc::new(Echo));

        let reply = transport
            .send_request("plant", "echo", json!({ "x": 1 }))
            .await
            .unwrap();
        assert_eq!(reply, json!({ "x": 1 }));
    }

    #[tokio::test]
    async fn unknown_project_is_dispatch_error() {
        let transport = InMemoryTransport::new();
        let err = transport
            .send_request("plant", "echo", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Dispatch { source: TransportError::NoPeer(_), .. }
        ));
    }

    #[tokio::test]
    async fn unknown_handler_is_dispatch_error() {
        let mut transport = InMemoryTransport::new();
        transport.register("plant", "echo", Arc::new(Echo));
        let err = transport
            .send_request("plant", "other", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Dispatch { source: TransportError::NoHandler { .. }, .. }
        ));
    }

    #[tokio::test]
    async fn peer_errors_keep_their_kind() {
        let mut transport = InMemoryTransport::new();
        transport.register("plant", "missing", Arc::new(Missing));
        let err = transport
            .send_request("plant", "missing", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("gone.json"));
    }
}
