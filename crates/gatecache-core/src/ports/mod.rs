//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部の協調者（ファイルシステム、メッセージ transport、
//! 実行環境）へのインターフェースを提供し、実装の詳細を隠蔽します。

pub mod clock;
pub mod scope;
pub mod source;
pub mod transport;

// 主要な trait を再エクスポート
pub use self::clock::ModificationClock;
pub use self::scope::ScopeResolver;
pub use self::source::FileSource;
pub use self::transport::Transport;
