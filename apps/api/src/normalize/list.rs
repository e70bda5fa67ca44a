use serde_json::Value;

use crate::normalize::fields::{stringify_items, Field};

/// Reads a string-or-list field as a list of non-empty strings.
///
/// Strings are tried as a serialized JSON list first, then split on commas.
pub fn parse_list_like(value: &Value) -> Vec<String> {
    list_from_field(Field::of(Some(value)))
}

pub(crate) fn list_from_field(field: Field<'_>) -> Vec<String> {
    match field {
        Field::Sequence(items) => stringify_items(items),
        Field::Text(text) => parse_text_list(text),
        Field::Absent | Field::Number(_) | Field::Other(_) => Vec::new(),
    }
}

fn parse_text_list(text: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return stringify_items(&items);
    }
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comma_separated_drops_empty_tokens() {
        assert_eq!(
            parse_list_like(&json!("Go, SQL, , Rust")),
            vec!["Go", "SQL", "Rust"]
        );
    }

    #[test]
    fn test_serialized_list_parsed_before_splitting() {
        assert_eq!(parse_list_like(&json!(r#"["Go","SQL"]"#)), vec!["Go", "SQL"]);
    }

    #[test]
    fn test_serialized_non_list_falls_back_to_split() {
        // Valid JSON, but not a list: treated as plain text.
        assert_eq!(parse_list_like(&json!(r#"{"a": 1}"#)), vec![r#"{"a": 1}"#]);
        assert_eq!(parse_list_like(&json!("42")), vec!["42"]);
    }

    #[test]
    fn test_sequence_is_stringified_in_order() {
        assert_eq!(
            parse_list_like(&json!(["Rust", "", 5, null])),
            vec!["Rust", "5"]
        );
    }

    #[test]
    fn test_empty_and_unsupported_inputs() {
        assert!(parse_list_like(&json!(null)).is_empty());
        assert!(parse_list_like(&json!("")).is_empty());
        assert!(parse_list_like(&json!("  ,  ,")).is_empty());
        assert!(parse_list_like(&json!(12)).is_empty());
        assert!(parse_list_like(&json!({"skills": ["Go"]})).is_empty());
    }
}
