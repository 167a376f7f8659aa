//! Deep merge of a localized mapping onto the baseline.

use serde_json::Value;

use crate::types::Mapping;

/// Overlays `localized` onto a copy of `baseline`.
///
/// Keys in both where both values are namespaces are merged recursively; any
/// other key in both takes the localized value. Baseline-only keys are kept
/// and localized-only keys are appended, so every baseline key survives.
#[must_use]
pub fn deep_merge(baseline: &Mapping, localized: &Mapping) -> Mapping {
    let mut merged = baseline.clone();

    for (key, value) in localized {
        let value = match (baseline.get(key), value) {
            (Some(Value::Object(base)), Value::Object(overlay)) => {
                Value::Object(deep_merge(base, overlay))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::mapping;

    /// Every key path of a mapping, e.g. `["a", "ns.b"]`.
    fn key_paths(mapping: &Mapping, prefix: &str) -> Vec<String> {
        mapping
            .iter()
            .flat_map(|(key, value)| {
                let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                match value {
                    Value::Object(nested) => key_paths(nested, &path),
                    _ => vec![path],
                }
            })
            .collect()
    }

    #[rstest]
    #[case::disjoint(json!({"a": "A"}), json!({"b": "B"}))]
    #[case::overlapping(json!({"a": "A", "b": "B"}), json!({"b": "b"}))]
    #[case::nested(json!({"ns": {"x": "X", "y": "Y"}}), json!({"ns": {"y": "y", "z": "z"}}))]
    #[case::flat_over_namespace(json!({"ns": {"x": "X"}, "k": "K"}), json!({"ns": "flat"}))]
    #[case::empty_localized(json!({"a": "A", "ns": {"b": "B"}}), json!({}))]
    fn merge_keeps_every_baseline_key(#[case] baseline: Value, #[case] localized: Value) {
        let baseline = mapping(baseline);
        let merged = deep_merge(&baseline, &mapping(localized));

        for key in baseline.keys() {
            assert!(merged.contains_key(key), "missing baseline key {key}");
        }
    }

    #[rstest]
    fn merge_localized_value_overrides_baseline() {
        let baseline = mapping(json!({"greeting": "Hello", "farewell": "Goodbye"}));
        let localized = mapping(json!({"greeting": "Bonjour"}));

        let merged = deep_merge(&baseline, &localized);

        assert_eq!(merged, mapping(json!({"greeting": "Bonjour", "farewell": "Goodbye"})));
    }

    #[rstest]
    fn merge_adds_localized_only_keys_after_baseline_keys() {
        let baseline = mapping(json!({"greeting": "Hello"}));
        let localized = mapping(json!({"extra": "En plus", "greeting": "Bonjour"}));

        let merged = deep_merge(&baseline, &localized);

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["greeting", "extra"]);
        assert_eq!(merged["extra"], json!("En plus"));
    }

    #[rstest]
    fn merge_namespaces_recursively() {
        let baseline = mapping(json!({
            "menu": {"open": "Open", "close": "Close", "file": {"save": "Save", "quit": "Quit"}}
        }));
        let localized = mapping(json!({
            "menu": {"open": "Ouvrir", "file": {"save": "Enregistrer"}}
        }));

        let merged = deep_merge(&baseline, &localized);

        assert_eq!(
            merged,
            mapping(json!({
                "menu": {
                    "open": "Ouvrir",
                    "close": "Close",
                    "file": {"save": "Enregistrer", "quit": "Quit"}
                }
            }))
        );
        assert_eq!(
            key_paths(&merged, ""),
            vec!["menu.open", "menu.close", "menu.file.save", "menu.file.quit"]
        );
    }

    #[rstest]
    #[case::flat_replaces_namespace(json!({"a": {"b": "B"}}), json!({"a": "A"}), json!({"a": "A"}))]
    #[case::namespace_replaces_flat(json!({"a": "A"}), json!({"a": {"b": "B"}}), json!({"a": {"b": "B"}}))]
    fn merge_type_mismatch_overwrites(
        #[case] baseline: Value,
        #[case] localized: Value,
        #[case] expected: Value,
    ) {
        let merged = deep_merge(&mapping(baseline), &mapping(localized));

        assert_eq!(merged, mapping(expected));
    }

    #[rstest]
    fn merge_with_empty_localized_is_identity() {
        let baseline = mapping(json!({"z": "Z", "a": "A", "ns": {"k": "K"}}));

        let merged = deep_merge(&baseline, &Mapping::new());

        assert_eq!(merged, baseline);
        assert_eq!(serde_json::to_string(&merged).unwrap(), serde_json::to_string(&baseline).unwrap());
    }

    #[rstest]
    fn merge_does_not_mutate_inputs() {
        let baseline = mapping(json!({"a": "A", "ns": {"b": "B"}}));
        let localized = mapping(json!({"a": "a", "ns": {"c": "c"}}));
        let (baseline_before, localized_before) = (baseline.clone(), localized.clone());

        let _ = deep_merge(&baseline, &localized);

        assert_eq!(baseline, baseline_before);
        assert_eq!(localized, localized_before);
    }
}
