//! Domain model (scope, request, cache entry, errors).

pub mod entry;
pub mod errors;
pub mod request;
pub mod scope;

pub use self::entry::{CacheEntry, is_falsy};
pub use self::errors::{DecodeError, ErrorKind, ErrorReply, GatewayError, TransportError};
pub use self::request::FileRequest;
pub use self::scope::{ExecutionScope, ParseScopeError};
