//! Errors - エラー型と分類
//!
//! すべてのエラーはリクエストにとって終端的で、呼び出し元へそのまま返します。
//! 握りつぶしたり自動リトライしたりはしません。

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ErrorKind はエラーの分類（transport を越えても保持される）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    UnsupportedType,
    Decode,
    Dispatch,
    Io,
    InvalidRequest,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::UnsupportedType => "unsupported_type",
            ErrorKind::Decode => "decode",
            ErrorKind::Dispatch => "dispatch",
            ErrorKind::Io => "io",
            ErrorKind::InvalidRequest => "invalid_request",
        };
        f.write_str(s)
    }
}

/// Decoder が中身を解釈できなかった
///
/// 元の原因（serde_json のエラーなど）を `source` に保持します。
#[derive(Debug, Error)]
#[error("not a valid {tag} document: {source}")]
pub struct DecodeError {
    pub tag: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl DecodeError {
    pub fn new(
        tag: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            tag: tag.into(),
            source: source.into(),
        }
    }
}

/// Transport 層の失敗（リトライは transport 側の責務）
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no peer registered for project '{0}'")]
    NoPeer(String),

    #[error("peer '{project}' has no handler named '{handler}'")]
    NoHandler { project: String, handler: String },

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport failure: {0}")]
    Failed(String),

    /// peer 側で起きた transport エラー（メッセージはそのまま）
    #[error("{0}")]
    Remote(String),
}

/// GatewayError は get_file_contents が返すエラー
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unable to find gateway file at {path}")]
    NotFound { path: String },

    #[error("unable to load {path}: no decoder registered for type '{tag}'")]
    UnsupportedType { path: String, tag: String },

    #[error("error loading {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("dispatch to project '{project}' failed: {source}")]
    Dispatch {
        project: String,
        #[source]
        source: TransportError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::NotFound { .. } => ErrorKind::NotFound,
            GatewayError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            GatewayError::Decode { .. } => ErrorKind::Decode,
            GatewayError::Dispatch { .. } => ErrorKind::Dispatch,
            GatewayError::Io { .. } => ErrorKind::Io,
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// transport で返送できる形に変換
    pub fn to_reply(&self) -> ErrorReply {
        let (subject, tag, message) = match self {
            GatewayError::NotFound { path } => (Some(path.clone()), None, self.to_string()),
            GatewayError::UnsupportedType { path, tag } => {
                (Some(path.clone()), Some(tag.clone()), self.to_string())
            }
            GatewayError::Decode { path, source } => (
                Some(path.clone()),
                Some(source.tag.clone()),
                source.source.to_string(),
            ),
            GatewayError::Dispatch { project, source } => {
                (Some(project.clone()), None, source.to_string())
            }
            GatewayError::Io { path, source } => (Some(path.clone()), None, source.to_string()),
            GatewayError::InvalidRequest(msg) => (None, None, msg.clone()),
        };
        ErrorReply {
            kind: self.kind(),
            subject,
            tag,
            message,
        }
    }

    /// 返送されたエラーを同じ kind の GatewayError に戻す
    pub fn from_reply(reply: ErrorReply) -> Self {
        let subject = reply.subject.unwrap_or_default();
        let tag = reply.tag.unwrap_or_default();
        match reply.kind {
            ErrorKind::NotFound => GatewayError::NotFound { path: subject },
            ErrorKind::UnsupportedType => GatewayError::UnsupportedType { path: subject, tag },
            ErrorKind::Decode => GatewayError::Decode {
                path: subject,
                source: DecodeError::new(tag, reply.message),
            },
            ErrorKind::Dispatch => GatewayError::Dispatch {
                project: subject,
                source: TransportError::Remote(reply.message),
            },
            ErrorKind::Io => GatewayError::Io {
                path: subject,
                source: std::io::Error::other(reply.message),
            },
            ErrorKind::InvalidRequest => GatewayError::InvalidRequest(reply.message),
        }
    }
}

/// ErrorReply は GatewayError のシリアライズ可能な表現
///
/// - `subject`: 対象のパス（Dispatch の場合は project 名）
/// - `tag`: UnsupportedType / Decode の type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub message: String,
}
