//! `.properties` document parser.
//!
//! Follows the familiar Java conventions: `#`/`!` comments, `=`, `:` or
//! whitespace between key and value, backslash line continuations and
//! `\uXXXX` escapes. Keys may optionally be nested into namespaces by a
//! separator (`app.title=...` becomes `{"app": {"title": "..."}}`).

use std::str::Chars;

use serde_json::Value;
use thiserror::Error;

use crate::types::Mapping;

/// Whitespace recognized between key and value.
const BLANKS: [char; 3] = [' ', '\t', '\x0c'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    /// `\u` not followed by a valid UTF-16 code unit (or surrogate pair).
    #[error("Invalid unicode escape on line {line}")]
    InvalidUnicodeEscape { line: usize },
}

/// Parse a `.properties` document into an ordered mapping.
///
/// When `namespace_separator` is set, keys are split on it and values are
/// stored in nested mappings. Conflicts between a flat value and a namespace
/// are resolved by overwriting with whatever comes later.
///
/// # Examples
/// ```
/// use i18n_bundler::input::properties::parse_properties;
///
/// let mapping = parse_properties("app.title = Hello\n", Some(".")).unwrap();
/// assert_eq!(mapping["app"]["title"], "Hello");
/// ```
///
/// # Errors
/// Returns [`PropertiesError::InvalidUnicodeEscape`] for malformed `\u` escapes.
pub fn parse_properties(
    text: &str,
    namespace_separator: Option<&str>,
) -> Result<Mapping, PropertiesError> {
    let mut mapping = Mapping::new();

    for (line, content) in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&content);
        let key = unescape(raw_key, line)?;
        let value = unescape(raw_value, line)?;

        match namespace_separator {
            Some(separator) => insert_nested(&mut mapping, &key, separator, value),
            None => {
                mapping.insert(key, Value::String(value));
            }
        }
    }

    Ok(mapping)
}

/// Joins continued physical lines and drops blanks and comments.
///
/// Returns `(first line number, content)` pairs; line numbers are 1-based.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, physical) in text.lines().enumerate() {
        let trimmed = physical.trim_start_matches(BLANKS);

        let (start, mut buffer) = match pending.take() {
            Some(continued) => continued,
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        match trimmed.strip_suffix('\\').filter(|_| has_continuation(trimmed)) {
            Some(head) => {
                buffer.push_str(head);
                pending = Some((start, buffer));
            }
            None => {
                buffer.push_str(trimmed);
                result.push((start, buffer));
            }
        }
    }

    // Continuation on the last line of the file.
    result.extend(pending);
    result
}

/// A line continues when it ends in an odd number of backslashes.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                break;
            }
            c if BLANKS.contains(&c) => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start_matches(BLANKS);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (key, rest.trim_start_matches(BLANKS))
}

/// Resolves backslash escapes; `line` is only used for error reporting.
fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0c'),
            Some('u') => result.push(decode_unicode_escape(&mut chars, line)?),
            Some(other) => result.push(other),
            None => {}
        }
    }

    Ok(result)
}

/// Decodes the digits after `\u`, consuming a trailing low surrogate escape if needed.
fn decode_unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char, PropertiesError> {
    let invalid = || PropertiesError::InvalidUnicodeEscape { line };
    let high = read_code_unit(chars).ok_or_else(invalid)?;

    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high.into()).ok_or_else(invalid);
    }

    let mut lookahead = chars.clone();
    let low = (lookahead.next() == Some('\\') && lookahead.next() == Some('u'))
        .then(|| read_code_unit(&mut lookahead))
        .flatten()
        .ok_or_else(invalid)?;
    let decoded = char::decode_utf16([high, low]).next().and_then(Result::ok).ok_or_else(invalid)?;
    *chars = lookahead;
    Ok(decoded)
}

/// Reads four hex digits as one UTF-16 code unit.
fn read_code_unit(chars: &mut Chars<'_>) -> Option<u16> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(&digits, 16).ok()
}

/// Inserts `value` at the path obtained by splitting `key` on `separator`.
fn insert_nested(mapping: &mut Mapping, key: &str, separator: &str, value: String) {
    let segments: Vec<&str> = key.split(separator).collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = mapping;
    for segment in parents {
        let entry =
            current.entry(*segment).or_insert_with(|| Value::Object(Mapping::new()));
        if !entry.is_object() {
            tracing::debug!(key, segment, "Replacing flat value with namespace");
            *entry = Value::Object(Mapping::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }

    current.insert((*last).to_string(), Value::String(value));
}
