//! gatecache-core
//!
//! gateway（特権コンテキスト）でファイルを読み、デコードした結果をプロセス内に
//! キャッシュし、client からのリクエストは gateway に転送して同じ結果を返します。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ExecutionScope, FileRequest, CacheEntry, errors）
//! - **ports**: 抽象化レイヤー（ModificationClock, Transport, ScopeResolver, FileSource）
//! - **decode**: Decoder と DecoderRegistry
//! - **app**: アプリケーションロジック（ArtifactCache, GatewayFileService, handler, builder）
//! - **impls**: 実装（LocalSource/RemoteSource, LocalFileSystem, InMemory 系）
//! - **config**: 環境変数からの設定
//! - **observability**: ログの初期化とキャッシュの状態ビュー

pub mod app;
pub mod config;
pub mod decode;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
