use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parser::{
    EducationEntry, ParsedResume, PersonalInfo, ProjectEntry, WorkExperienceEntry,
};
use crate::portfolio::ResumeAnalysis;

/// An uploaded resume as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<ParsedDocument>,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields supplied by the caller when storing a new resume.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
    pub filename: String,
    pub content: String,
}

/// What the LLM resume analysis returns: the same structured shape as the
/// heuristic segmenter plus a self-assessment block. Every field defaults so
/// a partial model response still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzedResume {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub analysis: Option<ResumeAnalysis>,
}

/// The merged parse attached to a stored resume: heuristic segmentation,
/// overlaid with the LLM analysis when one succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    #[serde(flatten)]
    pub resume: ParsedResume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ResumeAnalysis>,
    pub uploaded_at: DateTime<Utc>,
}

impl ParsedDocument {
    /// Overlays the LLM analysis on the heuristic parse. The analysis wins
    /// field-by-field wherever it extracted anything; the heuristic result
    /// fills the gaps, so a partial or failed analysis degrades gracefully.
    pub fn merge(basic: ParsedResume, ai: Option<AnalyzedResume>) -> Self {
        let Some(ai) = ai else {
            return Self {
                resume: basic,
                analysis: None,
                uploaded_at: Utc::now(),
            };
        };

        let personal_info = PersonalInfo {
            name: ai.personal_info.name.or(basic.personal_info.name),
            email: ai.personal_info.email.or(basic.personal_info.email),
            phone: ai.personal_info.phone.or(basic.personal_info.phone),
        };

        Self {
            resume: ParsedResume {
                personal_info,
                work_experience: prefer_nonempty(ai.work_experience, basic.work_experience),
                projects: prefer_nonempty(ai.projects, basic.projects),
                skills: prefer_nonempty(ai.skills, basic.skills),
                education: prefer_nonempty(ai.education, basic.education),
            },
            analysis: ai.analysis,
            uploaded_at: Utc::now(),
        }
    }
}

fn prefer_nonempty<T>(preferred: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
