use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What a role asks of a candidate. `required_education` is an `EducationLevel` ordinal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct JobRequirements {
    pub title: String,
    pub must_have_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub min_years_experience: f64,
    pub required_education: i64,
    pub description: String,
}

impl JobRequirements {
    /// Text the resume's raw text is compared against for keyword overlap.
    pub fn keyword_source(&self) -> String {
        let skills: Vec<&str> = self
            .must_have_skills
            .iter()
            .chain(&self.nice_to_have_skills)
            .map(String::as_str)
            .collect();
        format!("{}\n{}\n{}", self.title, self.description, skills.join(" "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRecord {
    pub id: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub requirements: JobRequirements,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_source_joins_title_description_and_skills() {
        let job = JobRequirements {
            title: "Backend Engineer".to_string(),
            must_have_skills: vec!["Rust".to_string()],
            nice_to_have_skills: vec!["Kafka".to_string()],
            description: "Build services".to_string(),
            ..JobRequirements::default()
        };
        assert_eq!(job.keyword_source(), "Backend Engineer\nBuild services\nRust Kafka");
    }

    #[test]
    fn test_requirements_ignore_client_supplied_id() {
        let job: JobRequirements =
            serde_json::from_str(r#"{"id": "abc", "title": "SRE", "min_years_experience": 3}"#)
                .unwrap();
        assert_eq!(job.title, "SRE");
        assert_eq!(job.min_years_experience, 3.0);
        assert!(job.must_have_skills.is_empty());
    }
}
