//! Lenient extraction of JSON from model output.
//!
//! Models wrap JSON in Markdown fences, prepend chatter, or return an object
//! around the array we asked for. These helpers recover the payload before
//! the typed shape check runs.

use serde::de::DeserializeOwned;
use serde_json::Value;

use studyhub_core::{Error, Result};

/// Remove a surrounding Markdown code fence, if any.
pub fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Return the first balanced `{...}` or `[...]` span in `text`.
///
/// Brackets inside JSON strings are ignored.
pub fn first_balanced_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

fn from_candidate<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, serde_json::Error> {
    let direct_err = match serde_json::from_str::<T>(raw) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };
    if let Ok(obj) = serde_json::from_str::<serde_json::Map<String, Value>>(raw) {
        // Object wrapping the expected array, e.g. {"flashcards": [...]}
        for value in obj.values() {
            if value.is_array() {
                if let Ok(v) = serde_json::from_value::<T>(value.clone()) {
                    return Ok(v);
                }
            }
        }
        // Single object where an array was expected.
        let wrapped = Value::Array(vec![Value::Object(obj)]);
        if let Ok(v) = serde_json::from_value::<T>(wrapped) {
            return Ok(v);
        }
    }
    Err(direct_err)
}

/// Parse model output into `T`, tolerating fences, wrapper objects and
/// surrounding prose.
pub fn parse_json_lenient<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let stripped = strip_code_fences(raw);
    let first_err = match from_candidate::<T>(stripped) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };

    if let Some(span) = first_balanced_span(stripped) {
        if let Ok(v) = from_candidate::<T>(span) {
            return Ok(v);
        }
    }

    Err(Error::MalformedResponse(format!(
        "model output is not the expected JSON: {}",
        first_err
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  [2] "), "[2]");
    }

    #[test]
    fn test_balanced_span_skips_prose() {
        let text = "Sure! Here you go: {\"a\": [1, 2]} Hope that helps.";
        assert_eq!(first_balanced_span(text), Some("{\"a\": [1, 2]}"));
    }

    #[test]
    fn test_balanced_span_ignores_brackets_in_strings() {
        let text = r#"x {"a": "}]", "b": "\"{"} y"#;
        assert_eq!(first_balanced_span(text), Some(r#"{"a": "}]", "b": "\"{"}"#));
    }

    #[test]
    fn test_balanced_span_unterminated() {
        assert_eq!(first_balanced_span("{\"a\": 1"), None);
        assert_eq!(first_balanced_span("no json"), None);
    }

    #[test]
    fn test_parse_direct_array() {
        let items: Vec<Item> = parse_json_lenient(r#"[{"name": "a"}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_fenced_wrapper_object() {
        let raw = "```json\n{\"items\": [{\"name\": \"a\"}, {\"name\": \"b\"}]}\n```";
        let items: Vec<Item> = parse_json_lenient(raw).unwrap();
        assert_eq!(items[1].name, "b");
    }

    #[test]
    fn test_parse_single_object_as_array() {
        let items: Vec<Item> = parse_json_lenient(r#"{"name": "solo"}"#).unwrap();
        assert_eq!(items, vec![Item { name: "solo".to_string() }]);
    }

    #[test]
    fn test_parse_embedded_in_prose() {
        let raw = "Here is the JSON you asked for:\n[{\"name\": \"x\"}]\nThanks";
        let items: Vec<Item> = parse_json_lenient(raw).unwrap();
        assert_eq!(items[0].name, "x");
    }

    #[test]
    fn test_parse_garbage_is_malformed_response() {
        let err = parse_json_lenient::<Vec<Item>>("I cannot help with that").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.is_adapter_failure());
    }
}
