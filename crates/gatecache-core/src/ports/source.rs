//! FileSource port - get_file_contents の戦略
//!
//! # 実装
//! - LocalSource: gateway 上でキャッシュを引く
//! - RemoteSource: gateway へ転送する
//!
//! どちらを使うかは起動時に一度だけ決めます。

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FileRequest, GatewayError};

#[async_trait]
pub trait FileSource: Send + Sync {
    async fn get_file_contents(&self, request: FileRequest) -> Result<Value, GatewayError>;
}
