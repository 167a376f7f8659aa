//! Bundle serialization.

use crate::config::OutputType;
use crate::types::Mapping;

/// How bundles are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFormat {
    pub output_type: OutputType,
    /// Identifier assigned to in [`OutputType::Js`] bundles.
    pub variable_name: String,
    pub pretty: bool,
}

impl BundleFormat {
    /// Renders a merged mapping.
    ///
    /// - `json`: the mapping as a JSON object, in mapping order
    /// - `js`: `<variableName> = <json>;`
    ///
    /// # Errors
    /// Returns the `serde_json` error if serialization fails.
    pub fn render(&self, mapping: &Mapping) -> Result<String, serde_json::Error> {
        let json = if self.pretty {
            serde_json::to_string_pretty(mapping)?
        } else {
            serde_json::to_string(mapping)?
        };

        Ok(match self.output_type {
            OutputType::Json => json,
            OutputType::Js => format!("{} = {json};", self.variable_name),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::mapping;

    #[fixture]
    fn json_format() -> BundleFormat {
        BundleFormat { output_type: OutputType::Json, variable_name: "i18n".to_string(), pretty: false }
    }

    #[rstest]
    fn render_json_keeps_mapping_order(json_format: BundleFormat) {
        let merged = mapping(json!({"greeting": "Bonjour", "farewell": "Au revoir"}));

        let output = json_format.render(&merged).unwrap();

        assert_that!(output, eq(r#"{"greeting":"Bonjour","farewell":"Au revoir"}"#));
    }

    #[rstest]
    fn render_json_nested_namespaces(json_format: BundleFormat) {
        let merged = mapping(json!({"app": {"title": "T", "menu": {"open": "O"}}, "x": "y"}));

        let output = json_format.render(&merged).unwrap();

        assert_that!(output, eq(r#"{"app":{"title":"T","menu":{"open":"O"}},"x":"y"}"#));
    }

    #[rstest]
    fn render_json_escapes_special_characters(json_format: BundleFormat) {
        let merged = mapping(json!({"quote": "say \"hi\"\n"}));

        let output = json_format.render(&merged).unwrap();

        assert_that!(output, eq(r#"{"quote":"say \"hi\"\n"}"#));
    }

    #[rstest]
    fn render_js_assigns_variable() {
        let format = BundleFormat {
            output_type: OutputType::Js,
            variable_name: "MESSAGES".to_string(),
            pretty: false,
        };

        let output = format.render(&mapping(json!({"greeting": "hi"}))).unwrap();

        assert_that!(output, eq(r#"MESSAGES = {"greeting":"hi"};"#));
    }

    #[rstest]
    fn render_js_payload_is_valid_json() {
        let format = BundleFormat {
            output_type: OutputType::Js,
            variable_name: "window.i18n".to_string(),
            pretty: true,
        };
        let merged = mapping(json!({"a": {"b": "c"}}));

        let output = format.render(&merged).unwrap();

        let payload = output
            .strip_prefix("window.i18n = ")
            .and_then(|rest| rest.strip_suffix(';'))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed, json!({"a": {"b": "c"}}));
    }

    #[rstest]
    fn render_pretty_json(mut json_format: BundleFormat) {
        json_format.pretty = true;

        let output = json_format.render(&mapping(json!({"a": "1"}))).unwrap();

        assert_that!(output, eq("{\n  \"a\": \"1\"\n}"));
    }

    #[rstest]
    fn render_empty_mapping(json_format: BundleFormat) {
        assert_that!(json_format.render(&Mapping::new()).unwrap(), eq("{}"));
    }
}
