//! Transport port - 外部の request/response チャネル
//!
//! ワイヤーフォーマットは transport 実装の責務です。

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::GatewayError;

/// Transport は名前付き peer の名前付き handler に同期リクエストを送る
///
/// # エラー
/// - transport 自体の失敗は `GatewayError::Dispatch`
/// - peer 側で起きたエラーは kind を保ったまま返す
///
/// リトライもタイムアウトもこの層では行いません。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_request(
        &self,
        project: &str,
        handler: &str,
        payload: Value,
    ) -> Result<Value, GatewayError>;
}
