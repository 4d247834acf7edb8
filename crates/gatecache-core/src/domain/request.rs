//! FileRequest - ファイル取得リクエスト
//!
//! local / remote の境界を値渡しで越える不変のリクエストです。

use serde::{Deserialize, Serialize};

/// FileRequest は「このファイルの中身がほしい」という要求
///
/// # フィールド
/// - `file_path`: gateway のファイルシステム上のパス
/// - `force_refresh`: mtime が新しくなくても読み直す（既定: false）
/// - `store_in_cache`: 読み直した結果をキャッシュに保存する（既定: true）
///
/// inbound RPC では `force_refresh` / `store_in_cache` は省略可能です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    pub file_path: String,
    #[serde(default)]
    pub force_refresh: bool,
    #[serde(default = "default_store_in_cache")]
    pub store_in_cache: bool,
}

fn default_store_in_cache() -> bool {
    true
}

impl FileRequest {
    /// 既定のフラグでリクエストを作成
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            force_refresh: false,
            store_in_cache: true,
        }
    }

    pub fn force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn store_in_cache(mut self, store_in_cache: bool) -> Self {
        self.store_in_cache = store_in_cache;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_uses_defaults() {
        let req = FileRequest::new("config/site.json");
        assert!(!req.force_refresh);
        assert!(req.store_in_cache);
    }

    #[test]
    fn optional_flags_default_when_missing() {
        let req: FileRequest = serde_json::from_value(json!({ "file_path": "a.json" })).unwrap();
        assert_eq!(req, FileRequest::new("a.json"));
    }

    #[test]
    fn explicit_flags_are_kept() {
        let req: FileRequest = serde_json::from_value(json!({
            "file_path": "a.json",
            "force_refresh": true,
            "store_in_cache": false,
        }))
        .unwrap();
        assert!(req.force_refresh);
        assert!(!req.store_in_cache);
    }

    #[test]
    fn file_path_is_required() {
        let result = serde_json::from_value::<FileRequest>(json!({ "force_refresh": true }));
        assert!(result.is_err());
    }
}
