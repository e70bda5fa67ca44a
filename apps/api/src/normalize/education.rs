use serde_json::{Number, Value};

use crate::models::resume::EducationLevel;
use crate::normalize::fields::{stringify, Field};

/// Substring tests in priority order. First match wins, so a string naming
/// several credentials resolves to whichever pattern set is checked first.
const EDUCATION_PATTERNS: &[(&[&str], EducationLevel)] = &[
    (&["phd", "doctor"], EducationLevel::Phd),
    (&["master", "m.sc", "ms"], EducationLevel::Master),
    (&["bachelor", "b.e", "btech", "b.sc"], EducationLevel::Bachelor),
    (&["associate"], EducationLevel::Associate),
    (&["high"], EducationLevel::HighSchool),
];

/// Infers an education ordinal from free text, a list of entries, or a number.
///
/// Numbers pass through unchanged, including ordinals outside the enumeration.
/// For lists only the first entry is inspected.
pub fn infer_education(value: &Value) -> i64 {
    education_from_field(Field::of(Some(value)))
}

pub(crate) fn education_from_field(field: Field<'_>) -> i64 {
    let text = match field {
        Field::Number(n) => return number_ordinal(n),
        Field::Sequence([first, ..]) => education_text(first),
        Field::Sequence(_) | Field::Absent => String::new(),
        Field::Text(s) => s.to_string(),
        Field::Other(v) => education_text(v),
    };
    classify_education(&text.to_lowercase()).ordinal()
}

/// Objects carry no classifiable text; their key names must not match a pattern.
fn education_text(value: &Value) -> String {
    match value {
        Value::Object(_) => String::new(),
        other => stringify(other).unwrap_or_default(),
    }
}

/// Classifies already-lowercased text.
pub fn classify_education(text: &str) -> EducationLevel {
    EDUCATION_PATTERNS
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| text.contains(p)))
        .map(|(_, level)| *level)
        .unwrap_or(EducationLevel::None)
}

fn number_ordinal(n: &Number) -> i64 {
    n.as_i64()
        .or_else(|| n.as_f64().map(|f| f as i64))
        .unwrap_or_default()
}
