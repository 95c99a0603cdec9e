use serde::{Deserialize, Serialize};

/// Contact details lifted from anywhere in the document.
/// Every field is best-effort; an unset field serializes as absent so an
/// empty parse renders `personalInfo` as `{}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One position under an EXPERIENCE section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// One entry under a PROJECTS section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub year: String,
}

/// One line under an EDUCATION section. Institution and degree are mutually
/// exclusive per record: a line either names a school or names a degree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

/// Best-effort structured view of a plain-text resume.
///
/// Every field is optional in spirit: callers must treat the whole record as
/// degraded output, not guaranteed-present data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_personal_info_serializes_as_empty_object() {
        let json = serde_json::to_value(PersonalInfo::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_parsed_resume_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(ParsedResume::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("personalInfo"));
        assert!(obj.contains_key("workExperience"));
        assert!(obj.contains_key("projects"));
        assert!(obj.contains_key("skills"));
        assert!(obj.contains_key("education"));
    }

    #[test]
    fn test_parsed_resume_deserializes_with_missing_fields() {
        let parsed: ParsedResume = serde_json::from_str(r#"{"skills": ["Python"]}"#).unwrap();
        assert_eq!(parsed.skills, vec!["Python"]);
        assert!(parsed.work_experience.is_empty());
        assert!(parsed.personal_info.name.is_none());
    }
}
