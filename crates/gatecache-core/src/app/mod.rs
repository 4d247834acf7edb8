//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **ArtifactCache**: キャッシュと無効化ポリシー
//! - **GatewayFileService**: 公開エントリポイント
//! - **GetFileContentsHandler**: gateway 側の inbound handler
//! - **AppBuilder**: 構築とワイヤリング

pub mod builder;
pub mod cache;
pub mod handler;
pub mod service;

// 主要な型を再エクスポート
pub use self::builder::{AppBuilder, BuildError, DEFAULT_PROJECT, Gateway};
pub use self::cache::ArtifactCache;
pub use self::handler::{GET_FILE_CONTENTS, GetFileContentsHandler, RequestHandler};
pub use self::service::GatewayFileService;
