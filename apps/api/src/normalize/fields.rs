//! Field access over untyped pipeline JSON.
//!
//! Every lookup is optional-chained and every conversion has a typed default,
//! so no payload shape can make the normalizer fail.

use serde_json::{Number, Value};

/// The shape of one payload field, decided once where it is read.
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    /// Missing key or explicit `null`.
    Absent,
    Number(&'a Number),
    Text(&'a str),
    Sequence(&'a [Value]),
    /// Booleans and objects.
    Other(&'a Value),
}

impl<'a> Field<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Field::Absent,
            Some(Value::Number(n)) => Field::Number(n),
            Some(Value::String(s)) => Field::Text(s),
            Some(Value::Array(items)) => Field::Sequence(items),
            Some(other) => Field::Other(other),
        }
    }

    /// Truthiness as the upstream producer treats it: empty strings, zero,
    /// `false` and absence are all "no value".
    pub fn is_truthy(&self) -> bool {
        match self {
            Field::Absent => false,
            Field::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Field::Text(s) => !s.is_empty(),
            Field::Sequence(_) => true,
            Field::Other(v) => !matches!(v, Value::Bool(false)),
        }
    }
}

/// Walks nested object keys. Any non-object step yields `None`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// First candidate that is truthy.
pub fn first_truthy<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .copied()
        .find(|candidate| Field::of(*candidate).is_truthy())
        .flatten()
}

/// First candidate that is present and not `null`.
pub fn first_present<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .copied()
        .find(|candidate| !matches!(Field::of(*candidate), Field::Absent))
        .flatten()
}

/// String form of a scalar or structure. `null` has none.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Stringifies every element, dropping nulls and empty strings. Order is kept.
pub fn stringify_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(stringify)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lenient numeric coercion. Blank strings, `null` and `false` count as zero;
/// anything unparseable or non-finite yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => coerce_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_and_missing() {
        let payload = json!({"a": {"b": {"c": 1}}});
        assert_eq!(lookup(&payload, &["a", "b", "c"]), Some(&json!(1)));
        assert_eq!(lookup(&payload, &["a", "x", "c"]), None);
        assert_eq!(lookup(&json!("scalar"), &["a"]), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Field::of(None).is_truthy());
        assert!(!Field::of(Some(&json!(null))).is_truthy());
        assert!(!Field::of(Some(&json!(""))).is_truthy());
        assert!(!Field::of(Some(&json!(0))).is_truthy());
        assert!(!Field::of(Some(&json!(false))).is_truthy());
        assert!(Field::of(Some(&json!([]))).is_truthy());
        assert!(Field::of(Some(&json!({}))).is_truthy());
        assert!(Field::of(Some(&json!("x"))).is_truthy());
    }

    #[test]
    fn test_first_truthy_skips_empty_string() {
        let empty = json!("");
        let name = json!("Jane");
        assert_eq!(first_truthy(&[Some(&empty), Some(&name)]), Some(&name));
        assert_eq!(first_truthy(&[None, Some(&empty)]), None);
    }

    #[test]
    fn test_first_present_keeps_zero_and_empty() {
        let zero = json!(0);
        let other = json!(7);
        let null = json!(null);
        assert_eq!(first_present(&[Some(&zero), Some(&other)]), Some(&zero));
        assert_eq!(first_present(&[Some(&null), Some(&other)]), Some(&other));
    }

    #[test]
    fn test_stringify_items_drops_empty_and_null() {
        let items = vec![json!("Go"), json!(""), json!(null), json!(3), json!(true)];
        assert_eq!(stringify_items(&items), vec!["Go", "3", "true"]);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!("4")), Some(4.0));
        assert_eq!(coerce_number(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(coerce_number(&json!("")), Some(0.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(["6"])), Some(6.0));
        assert_eq!(coerce_number(&json!("not-a-number")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!({"years": 3})), None);
        assert_eq!(coerce_number(&json!([1, 2])), None);
    }
}
