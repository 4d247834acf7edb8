//! CacheEntry - キャッシュされた artifact

use chrono::{DateTime, Utc};
use serde_json::Value;

/// CacheEntry はデコード済みデータと、そのデータを作ったときの mtime の組
///
/// # 不変条件
/// - `data` と `last_modified` は常に一緒に更新される
/// - エントリは `Arc<CacheEntry>` ごと差し替える（部分的な書き込みはしない）
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: Value,
    pub last_modified: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(data: Value, last_modified: DateTime<Utc>) -> Self {
        Self {
            data,
            last_modified,
        }
    }

    /// 一度も正常にキャッシュされていないものとして扱うべきか
    pub fn is_empty(&self) -> bool {
        is_falsy(&self.data)
    }
}

/// falsy な値（null, false, 0, "", [], {}）を判定する
///
/// 空ファイル相当の値はキャッシュミス扱いになり、次回の lookup で読み直される。
/// 正当に空の値へデコードされるファイルも毎回読み直される点に注意。
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::null(json!(null), true)]
    #[case::false_(json!(false), true)]
    #[case::zero(json!(0), true)]
    #[case::zero_float(json!(0.0), true)]
    #[case::empty_string(json!(""), true)]
    #[case::empty_array(json!([]), true)]
    #[case::empty_object(json!({}), true)]
    #[case::true_(json!(true), false)]
    #[case::number(json!(-3), false)]
    #[case::string(json!("x"), false)]
    #[case::array(json!([0]), false)]
    #[case::object(json!({ "a": null }), false)]
    fn falsy_follows_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_falsy(&value), expected);
    }

    #[test]
    fn entry_reports_empty_data() {
        let entry = CacheEntry::new(json!({}), Utc::now());
        assert!(entry.is_empty());
    }
}
