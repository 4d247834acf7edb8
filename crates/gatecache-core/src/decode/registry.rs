//! DecoderRegistry - type tag から Decoder を引く
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Arc による共有所有権
//!
//! 起動時に組み立て（mutable）、リクエスト処理中は読み取り専用で使います。

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::codec::{Decoder, JsonDecoder};
use crate::domain::DecodeError;

/// DecoderRegistry は type tag（拡張子）と Decoder の対応表
///
/// # 使用例
/// ```ignore
/// let mut registry = DecoderRegistry::new();
/// registry.register("json", JsonDecoder)?;
///
/// let value = registry.decode("json", br#"{"a":1}"#)?;
/// ```
///
/// # タグの正規化
/// - 先頭の `.` は取り除く（`".json"` と `"json"` は同じタグ）
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

/// RegistryError は DecoderRegistry の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("decoder for type tag '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("no decoder registered for type tag '{0}'")]
    Unsupported(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// JSON decoder を登録済みの registry
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .decoders
            .insert(JsonDecoder::TAG.to_string(), Arc::new(JsonDecoder));
        registry
    }

    pub fn register<D: Decoder + 'static>(
        &mut self,
        tag: &str,
        decoder: D,
    ) -> Result<(), RegistryError> {
        let tag = normalize_tag(tag);
        if self.decoders.contains_key(&tag) {
            return Err(RegistryError::AlreadyRegistered(tag));
        }
        self.decoders.insert(tag, Arc::new(decoder));
        Ok(())
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn Decoder>> {
        self.decoders.get(&normalize_tag(tag)).cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(&normalize_tag(tag))
    }

    pub fn decode(&self, tag: &str, raw: &[u8]) -> Result<Value, RegistryError> {
        let decoder = self
            .get(tag)
            .ok_or_else(|| RegistryError::Unsupported(normalize_tag(tag)))?;
        Ok(decoder.decode(raw)?)
    }

    pub fn registered_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.decoders.keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("tags", &self.registered_tags())
            .finish()
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim_start_matches('.').to_string()
}

/// パスの拡張子（`.` なし）。拡張子がなければ空文字列。
pub fn type_tag(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn text_decoder(raw: &[u8]) -> Result<Value, DecodeError> {
        let text = std::str::from_utf8(raw).map_err(|e| DecodeError::new("txt", e))?;
        Ok(Value::String(text.to_string()))
    }

    #[test]
    fn register_and_decode() {
        let mut registry = DecoderRegistry::new();
        registry.register("txt", text_decoder).unwrap();

        let value = registry.decode("txt", b"hello").unwrap();
        assert_eq!(value, json!("hello"));
    }

    #[test]
    fn leading_dot_names_the_same_tag() {
        let mut registry = DecoderRegistry::new();
        registry.register(".json", JsonDecoder).unwrap();
        assert!(registry.contains("json"));
        assert!(registry.get(".json").is_some());
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut registry = DecoderRegistry::with_defaults();
        let result = registry.register("json", JsonDecoder);
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(tag)) if tag == "json"));
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let registry = DecoderRegistry::with_defaults();
        let result = registry.decode("yaml", b"a: 1");
        assert!(matches!(result, Err(RegistryError::Unsupported(tag)) if tag == "yaml"));
    }

    #[test]
    fn decoder_failure_is_propagated() {
        let registry = DecoderRegistry::with_defaults();
        let result = registry.decode("json", b"{not json");
        assert!(matches!(result, Err(RegistryError::Decode(e)) if e.tag == "json"));
    }

    #[test]
    fn registered_tags_are_sorted() {
        let mut registry = DecoderRegistry::with_defaults();
        registry.register("txt", text_decoder).unwrap();
        assert_eq!(registry.registered_tags(), vec!["json", "txt"]);
    }

    #[rstest]
    #[case::json("config/site.json", "json")]
    #[case::nested_dots("a/b.v2.json", "json")]
    #[case::no_extension("Makefile", "")]
    #[case::hidden_file("dir/.json", "")]
    #[case::upper_case("A.JSON", "JSON")]
    fn type_tag_is_the_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(type_tag(path), expected);
    }
}
