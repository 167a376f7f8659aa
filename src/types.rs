//! Core types used throughout the project.

use serde_json::{
    Map,
    Value,
};

/// Ordered key to value mapping of one translation document.
///
/// Leaves are [`Value::String`]; namespaces are nested [`Value::Object`]s.
/// Insertion order is preserved (`serde_json`'s `preserve_order` feature).
pub type Mapping = Map<String, Value>;

/// Counts the string leaves of a mapping, descending into namespaces.
#[must_use]
pub fn leaf_count(mapping: &Mapping) -> usize {
    mapping
        .values()
        .map(|value| match value {
            Value::Object(nested) => leaf_count(nested),
            _ => 1,
        })
        .sum()
}
