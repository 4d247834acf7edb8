//! Decode - type tag ごとの Decoder と、その registry
//!
//! - **Decoder**: `&[u8] -> Value` の純粋関数（object-safe）
//! - **DecoderRegistry**: type tag から Decoder を選ぶ（実行時に拡張可能）

pub mod codec;
pub mod registry;

pub use self::codec::{Decoder, JsonDecoder};
pub use self::registry::{DecoderRegistry, RegistryError, type_tag};
