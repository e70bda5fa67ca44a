use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ordinal education level. Higher ordinal = more advanced credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationLevel {
    None = 0,
    HighSchool = 1,
    Associate = 2,
    Bachelor = 3,
    Master = 4,
    Phd = 5,
}

impl EducationLevel {
    pub fn ordinal(self) -> i64 {
        self as i64
    }
}

/// Canonical resume shape produced by the normalizer and consumed by the matcher.
///
/// `education` is an [`EducationLevel`] ordinal kept as a plain integer: numeric
/// upstream values are passed through without range checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub years_experience: f64,
    pub education: i64,
    pub raw_text: String,
}

/// A stored resume: identity and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRecord {
    pub id: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub resume: ParsedResume,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_ordinals_are_ordered() {
        assert_eq!(EducationLevel::None.ordinal(), 0);
        assert_eq!(EducationLevel::Phd.ordinal(), 5);
        assert!(EducationLevel::Master > EducationLevel::Bachelor);
    }

    #[test]
    fn test_parsed_resume_missing_fields_default() {
        let resume: ParsedResume = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(resume.name, "Ada");
        assert!(resume.skills.is_empty());
        assert_eq!(resume.years_experience, 0.0);
        assert_eq!(resume.education, 0);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = ResumeRecord {
            id: Uuid::nil(),
            resume: ParsedResume {
                name: "Ada".to_string(),
                ..ParsedResume::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Ada");
        assert!(value.get("resume").is_none());
        assert!(value.get("created_at").is_some());
    }
}
