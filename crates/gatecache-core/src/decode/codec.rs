//! Decoder - 生のバイト列を artifact に変換する
//!
//! # 学習ポイント
//! - Object-safe trait (`dyn Decoder`)
//! - クロージャへの blanket impl（`Fn(&[u8]) -> Result<Value, DecodeError>` もそのまま登録できる）

use serde_json::Value;

use crate::domain::DecodeError;

/// Decoder はバイト列を `serde_json::Value` にデコードする純粋関数
///
/// 不正な入力に対しては必ず `DecodeError` を返し、部分的なデータや null を
/// 成功として返してはいけません（キャッシュに壊れたエントリが残るため）。
pub trait Decoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<Value, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&[u8]) -> Result<Value, DecodeError> + Send + Sync,
{
    fn decode(&self, raw: &[u8]) -> Result<Value, DecodeError> {
        self(raw)
    }
}

/// JSON ファイル用の Decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub const TAG: &'static str = "json";
}

impl Decoder for JsonDecoder {
    fn decode(&self, raw: &[u8]) -> Result<Value, DecodeError> {
        serde_json::from_slice(raw).map_err(|e| DecodeError::new(Self::TAG, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_decoder_parses_objects() {
        let value = JsonDecoder.decode(br#"{"a": 1, "b": [true]}"#).unwrap();
        assert_eq!(value, json!({ "a": 1, "b": [true] }));
    }

    #[test]
    fn json_decoder_rejects_truncated_input() {
        let err = JsonDecoder.decode(br#"{"a": 1"#).unwrap_err();
        assert_eq!(err.tag, "json");
    }

    #[test]
    fn json_decoder_rejects_invalid_utf8() {
        assert!(JsonDecoder.decode(&[b'"', 0xff, 0xfe, b'"']).is_err());
    }

    #[test]
    fn json_decoder_rejects_empty_input() {
        assert!(JsonDecoder.decode(b"").is_err());
    }

    #[test]
    fn closures_are_decoders() {
        let upper = |raw: &[u8]| -> Result<Value, DecodeError> {
            let text = std::str::from_utf8(raw).map_err(|e| DecodeError::new("txt", e))?;
            Ok(Value::String(text.to_uppercase()))
        };
        assert_eq!(upper.decode(b"abc").unwrap(), json!("ABC"));
    }
}
