//! Payload Normalizer — turns a loosely-shaped pipeline result into a `ParsedResume`.
//!
//! The upstream parsing service changes shape between versions, so nothing here
//! validates: every missing or mistyped field degrades to a default.
//!
//! Extraction source, highest precedence first:
//!   `pipeline_results.extracted_data` → `extracted_data` → empty.
//! Each output field then falls back to the matching top-level key.

pub mod education;
pub mod fields;
pub mod list;

use serde_json::{Map, Value};

use crate::models::resume::ParsedResume;
use crate::normalize::education::education_from_field;
use crate::normalize::fields::{
    coerce_number, first_present, first_truthy, lookup, stringify, Field,
};
use crate::normalize::list::list_from_field;

pub use education::infer_education;
pub use list::parse_list_like;

/// Normalizes a pipeline result. Pure; never fails.
pub fn normalize(payload: &Value) -> ParsedResume {
    let extraction = extraction_source(payload);
    let extracted = |key: &str| extraction.and_then(|fields| fields.get(key));
    let top = |key: &str| payload.get(key);

    let name = text_or_empty(first_truthy(&[extracted("full_name"), top("name")]));
    let email = text_or_empty(first_truthy(&[extracted("email_id"), top("email")]));

    let skills = skills_from(extracted("skills"))
        .or_else(|| skills_from(top("skills")))
        .unwrap_or_default();

    let years_experience = first_present(&[extracted("years_experience"), top("years_experience")])
        .and_then(coerce_number)
        .filter(|years| *years > 0.0)
        .unwrap_or(0.0);

    let education = education_from_field(Field::of(first_present(&[
        extracted("education"),
        top("education"),
    ])));

    let raw_text = text_or_empty(first_truthy(&[
        lookup(payload, &["pipeline_results", "resume_text"]),
        top("raw_text"),
    ]));

    ParsedResume {
        name,
        email,
        phone: String::new(),
        skills,
        years_experience,
        education,
        raw_text,
    }
}

/// Interview questions generated by the pipeline, if it produced any.
pub fn extract_interview_questions(payload: &Value) -> Option<Value> {
    lookup(payload, &["pipeline_results", "interview_questions"])
        .filter(|questions| Field::of(Some(questions)).is_truthy())
        .cloned()
}

fn extraction_source(payload: &Value) -> Option<&Map<String, Value>> {
    lookup(payload, &["pipeline_results", "extracted_data"])
        .and_then(Value::as_object)
        .or_else(|| payload.get("extracted_data").and_then(Value::as_object))
}

/// `None` when the field carries no value, so the caller can fall back.
fn skills_from(value: Option<&Value>) -> Option<Vec<String>> {
    let field = Field::of(value);
    field.is_truthy().then(|| list_from_field(field))
}

fn text_or_empty(value: Option<&Value>) -> String {
    value.and_then(stringify).unwrap_or_default()
}
