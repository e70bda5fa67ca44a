//! Resume-to-job match scoring.
//!
//! Component scores are all 0.0 – 1.0:
//! - skills: must-haves worth 2 points, nice-to-haves 1; missing any must-have ×0.8
//! - experience: years / min_years, capped at 1
//! - education: candidate ordinal / required ordinal, clamped to [0, 1]
//! - keywords: Jaccard overlap of raw text vs the job's title, description and skills
//!
//! The overall score is the weighted sum scaled to 0 – 100, one decimal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::{JobRecord, JobRequirements};
use crate::models::resume::ParsedResume;

const DEFAULT_SKILLS_WEIGHT: f64 = 0.70;
const DEFAULT_EXPERIENCE_WEIGHT: f64 = 0.25;
const DEFAULT_EDUCATION_WEIGHT: f64 = 0.03;
const DEFAULT_KEYWORDS_WEIGHT: f64 = 0.02;

/// Penalty applied to the skill score when any must-have skill is missing.
const MISSING_MUST_HAVE_PENALTY: f64 = 0.8;

/// Common spellings folded onto one canonical skill name.
const SYNONYMS: &[(&str, &str)] = &[
    ("reactjs", "react"),
    ("react.js", "react"),
    ("node", "node.js"),
    ("nodejs", "node.js"),
    ("express", "express.js"),
    ("ts", "typescript"),
    ("js", "javascript"),
    ("postgres", "postgresql"),
    ("postgre", "postgresql"),
    ("pgsql", "postgresql"),
    ("np", "numpy"),
    ("numy", "numpy"),
    ("deeplearing", "deep learning"),
    ("power bi", "powerbi"),
    ("power-bi", "powerbi"),
    ("github", "git"),
];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Caller-supplied weights. Missing fields take the defaults; the four are
/// normalized to sum to 1 before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weights {
    pub skills: Option<f64>,
    pub experience: Option<f64>,
    pub education: Option<f64>,
    pub keywords: Option<f64>,
}

/// Each component ×100, one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub matched_must_have: usize,
    pub matched_nice_to_have: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    /// 0 – 100
    pub score: f64,
    pub breakdown: MatchBreakdown,
    pub details: MatchDetails,
}

/// One resume scored against one stored job.
#[derive(Debug, Clone, Serialize)]
pub struct RoleMatch {
    pub job_id: uuid::Uuid,
    pub title: String,
    pub score: f64,
    pub breakdown: MatchBreakdown,
    pub details: MatchDetails,
}

/// One row of a single-job leaderboard. `index` is the resume's position in the request.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub index: usize,
    pub score: f64,
    pub years_experience: f64,
    pub breakdown: MatchBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Score,
    Experience,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillScore {
    pub score: f64,
    pub matched_must: usize,
    pub matched_nice: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Component scores
// ────────────────────────────────────────────────────────────────────────────

fn normalize_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn canonical_skill(s: &str) -> String {
    let normalized = normalize_text(s);
    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(normalized)
}

fn word_tokens(s: &str) -> HashSet<String> {
    normalize_text(s)
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

pub fn skill_score(candidate: &[String], must_have: &[String], nice_to_have: &[String]) -> SkillScore {
    let candidate: Vec<(String, HashSet<String>)> = candidate
        .iter()
        .map(|skill| {
            let canonical = canonical_skill(skill);
            let tokens = word_tokens(&canonical);
            (canonical, tokens)
        })
        .collect();

    let has = |required: &String| {
        let canonical = canonical_skill(required);
        if candidate.iter().any(|(skill, _)| *skill == canonical) {
            return true;
        }
        let required_tokens = word_tokens(&canonical);
        candidate
            .iter()
            .any(|(_, tokens)| required_tokens.is_subset(tokens))
    };

    let matched_must = must_have.iter().filter(|&s| has(s)).count();
    let matched_nice = nice_to_have.iter().filter(|&s| has(s)).count();

    let total_points = 2 * must_have.len() + nice_to_have.len();
    if total_points == 0 {
        return SkillScore {
            score: 0.0,
            matched_must,
            matched_nice,
        };
    }

    let mut score = (2 * matched_must + matched_nice) as f64 / total_points as f64;
    if matched_must < must_have.len() {
        score *= MISSING_MUST_HAVE_PENALTY;
    }
    SkillScore {
        score,
        matched_must,
        matched_nice,
    }
}

pub fn experience_score(candidate_years: f64, min_years: f64) -> f64 {
    let years = candidate_years.max(0.0);
    if min_years <= 0.0 {
        return 1.0;
    }
    (years / min_years).min(1.0)
}

pub fn education_score(candidate: i64, required: i64) -> f64 {
    if required <= 0 {
        return 1.0;
    }
    (candidate as f64 / required as f64).clamp(0.0, 1.0)
}

pub fn keywords_score(resume_text: &str, source_text: &str) -> f64 {
    let a = word_tokens(resume_text);
    let b = word_tokens(source_text);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Weighted overall score on a 0 – 100 scale, one decimal.
pub fn overall_score(weights: Option<&Weights>, components: &MatchBreakdown) -> f64 {
    let w = weights.cloned().unwrap_or_default();
    let mut skills_w = w.skills.unwrap_or(DEFAULT_SKILLS_WEIGHT);
    let mut exp_w = w.experience.unwrap_or(DEFAULT_EXPERIENCE_WEIGHT);
    let mut edu_w = w.education.unwrap_or(DEFAULT_EDUCATION_WEIGHT);
    let mut kw_w = w.keywords.unwrap_or(DEFAULT_KEYWORDS_WEIGHT);

    let mut total = skills_w + exp_w + edu_w + kw_w;
    if total.is_nan() || total <= 0.0 {
        skills_w = DEFAULT_SKILLS_WEIGHT;
        exp_w = DEFAULT_EXPERIENCE_WEIGHT;
        edu_w = DEFAULT_EDUCATION_WEIGHT;
        kw_w = DEFAULT_KEYWORDS_WEIGHT;
        total = 1.0;
    }

    let final_score = (skills_w * components.skills
        + exp_w * components.experience
        + edu_w * components.education
        + kw_w * components.keywords)
        / total;
    round1(final_score * 100.0)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring entry points
// ────────────────────────────────────────────────────────────────────────────

pub fn score_resume(
    resume: &ParsedResume,
    job: &JobRequirements,
    weights: Option<&Weights>,
) -> MatchResponse {
    let skills = skill_score(&resume.skills, &job.must_have_skills, &job.nice_to_have_skills);
    let components = MatchBreakdown {
        skills: skills.score,
        experience: experience_score(resume.years_experience, job.min_years_experience),
        education: education_score(resume.education, job.required_education),
        keywords: keywords_score(&resume.raw_text, &job.keyword_source()),
    };

    MatchResponse {
        score: overall_score(weights, &components),
        breakdown: MatchBreakdown {
            skills: round1(components.skills * 100.0),
            experience: round1(components.experience * 100.0),
            education: round1(components.education * 100.0),
            keywords: round1(components.keywords * 100.0),
        },
        details: MatchDetails {
            matched_must_have: skills.matched_must,
            matched_nice_to_have: skills.matched_nice,
        },
    }
}

/// Scores every resume against one job, preserving input order.
pub fn score_batch(
    resumes: &[ParsedResume],
    job: &JobRequirements,
    weights: Option<&Weights>,
) -> Vec<MatchResponse> {
    resumes
        .iter()
        .map(|resume| score_resume(resume, job, weights))
        .collect()
}

/// Scores one resume against every job, best match first.
pub fn score_against_jobs(
    resume: &ParsedResume,
    jobs: &[JobRecord],
    weights: Option<&Weights>,
) -> Vec<RoleMatch> {
    let mut matches: Vec<RoleMatch> = jobs
        .iter()
        .map(|job| {
            let result = score_resume(resume, &job.requirements, weights);
            RoleMatch {
                job_id: job.id,
                title: job.requirements.title.clone(),
                score: result.score,
                breakdown: result.breakdown,
                details: result.details,
            }
        })
        .collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

/// Ranks resumes for one job by score or years of experience.
pub fn leaderboard(
    resumes: &[ParsedResume],
    job: &JobRequirements,
    weights: Option<&Weights>,
    sort: SortKey,
    order: SortOrder,
) -> Vec<CandidateScore> {
    let mut rows: Vec<CandidateScore> = resumes
        .iter()
        .enumerate()
        .map(|(index, resume)| {
            let result = score_resume(resume, job, weights);
            CandidateScore {
                index,
                score: result.score,
                years_experience: resume.years_experience,
                breakdown: result.breakdown,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = match sort {
            SortKey::Score => a.score.total_cmp(&b.score),
            SortKey::Experience => a.years_experience.total_cmp(&b.years_experience),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    rows
}
