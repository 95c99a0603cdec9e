//! Static portfolio data served at `/api/portfolio` and embedded into the
//! chat system prompt. Built once at startup; the site owner edits this file
//! to change what the site shows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

/// Self-assessment block rendered on the site and also produced by the LLM
/// resume analysis on upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    /// 0-100.
    pub completeness: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub personal_info: Profile,
    pub work_experience: Vec<Role>,
    pub projects: Vec<ShowcaseProject>,
    pub skills: Vec<String>,
    pub education: Vec<EducationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ResumeAnalysis>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The showcase record for the site owner.
pub fn data() -> PortfolioData {
    PortfolioData {
        personal_info: Profile {
            name: "Avery Collins".to_string(),
            title: "Data Analyst & Data Scientist".to_string(),
            email: "avery.collins@example.com".to_string(),
            phone: None,
            github: Some("https://github.com/averycollins".to_string()),
            linkedin: Some("https://www.linkedin.com/in/avery-collins".to_string()),
            location: Some("United States".to_string()),
            summary: "Adaptable data analyst and data scientist turning raw data into \
                      actionable insight through machine learning and AI-driven tooling. \
                      Proficient in Python, SQL, and statistical modeling, with a track \
                      record of measurable efficiency gains."
                .to_string(),
        },
        work_experience: vec![
            Role {
                company: "Co-operative Insurance Group".to_string(),
                position: "Senior Data Analyst".to_string(),
                duration: "2022 - 2025".to_string(),
                location: Some("Remote".to_string()),
                description: strings(&[
                    "Built AI-driven automation tools that improved operational efficiency by 70%",
                    "Mentored junior analysts on statistical modeling and reporting pipelines",
                ]),
                technologies: strings(&["Python", "SQL", "Scikit-learn", "Tableau"]),
            },
            Role {
                company: "Brightline Analytics".to_string(),
                position: "Data Scientist".to_string(),
                duration: "2019 - 2022".to_string(),
                location: None,
                description: strings(&[
                    "Shipped pricing models and dashboards used by three product teams",
                ]),
                technologies: strings(&["Python", "R", "PostgreSQL"]),
            },
        ],
        projects: vec![
            ShowcaseProject {
                name: "Dream & Mood Analysis with EEG".to_string(),
                description: "Python application analyzing dreams and moods from simulated \
                              EEG input, with NLP-based emotional pattern detection"
                    .to_string(),
                technologies: strings(&["Python", "NLP", "Matplotlib", "Seaborn"]),
                year: Some("2025".to_string()),
                url: Some("https://github.com/averycollins/dream-analysis".to_string()),
            },
            ShowcaseProject {
                name: "RAG Chatbot".to_string(),
                description: "Context-aware chatbot using retrieval-augmented generation \
                              with Streamlit and Hugging Face transformers"
                    .to_string(),
                technologies: strings(&["Python", "Streamlit", "LangChain"]),
                year: Some("2025".to_string()),
                url: Some("https://github.com/averycollins/rag-chatbot".to_string()),
            },
            ShowcaseProject {
                name: "Policy Pricing Model".to_string(),
                description: "Machine learning model for automated insurance policy pricing \
                              with statistical analysis of competitive positioning"
                    .to_string(),
                technologies: strings(&["Python", "Scikit-learn"]),
                year: Some("2024".to_string()),
                url: Some("https://github.com/averycollins/policy-pricing".to_string()),
            },
            ShowcaseProject {
                name: "Data Science Dashboard".to_string(),
                description: "React and Flask rebuild of a data science project with \
                              reusable visualization components"
                    .to_string(),
                technologies: strings(&["React", "Python", "Flask", "JavaScript"]),
                year: Some("2019".to_string()),
                url: Some("https://github.com/averycollins/ds-dashboard".to_string()),
            },
        ],
        skills: strings(&["Python", "SQL", "Machine Learning", "React"]),
        education: vec![
            EducationRecord {
                institution: "Northeastern University".to_string(),
                degree: "M.S. in Artificial Intelligence".to_string(),
                year: "2020-2022".to_string(),
            },
            EducationRecord {
                institution: "State Technical University".to_string(),
                degree: "B.Tech in Chemical Engineering".to_string(),
                year: "2011-2015".to_string(),
            },
        ],
        analysis: Some(ResumeAnalysis {
            completeness: 95.0,
            strengths: strings(&[
                "Strong technical depth in data science and machine learning",
                "Mentorship and leadership experience",
                "Proven track record of efficiency improvements",
            ]),
            improvements: strings(&[
                "Add specific project metrics and outcomes",
                "Include certifications if available",
            ]),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_data_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(data()).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("workExperience").is_some());
        assert_eq!(json["personalInfo"]["name"], "Avery Collins");
    }

    #[test]
    fn test_portfolio_data_round_trips() {
        let json = serde_json::to_string(&data()).unwrap();
        let back: PortfolioData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projects.len(), data().projects.len());
    }
}
