//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::Value;

use crate::types::Mapping;

/// `json!` で書いたオブジェクトを `Mapping` に変換する
///
/// # Panics
/// オブジェクト以外が渡された場合
#[allow(clippy::panic)]
pub(crate) fn mapping(value: Value) -> Mapping {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
