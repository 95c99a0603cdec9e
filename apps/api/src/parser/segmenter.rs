//! Heuristic resume text segmenter.
//!
//! A single forward pass over trimmed, non-empty lines with a section state
//! machine (experience / projects / skills / education) and one pending-entry
//! slot. The pass never fails: arbitrary text degrades to partially-empty
//! output rather than an error, so the function is total over all inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::parser::models::{
    EducationEntry, ParsedResume, PersonalInfo, ProjectEntry, WorkExperienceEntry,
};
use crate::parser::vocabulary;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());

// Loose North-American phone shape: optional country code, optional parens,
// dash/dot/space separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})").unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// The parser's current interpretation context for subsequent lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Experience,
    Projects,
    Skills,
    Education,
}

/// Work entry under construction. Description lines are collected verbatim
/// and space-joined only when the entry is finalized.
#[derive(Debug, Default)]
struct WorkDraft {
    company: String,
    position: String,
    duration: String,
    description: Vec<String>,
    technologies: Vec<String>,
}

impl WorkDraft {
    fn finish(self) -> WorkExperienceEntry {
        WorkExperienceEntry {
            company: self.company,
            position: self.position,
            duration: self.duration,
            description: self.description.join(" ").trim().to_string(),
            technologies: dedup_preserving_order(self.technologies),
        }
    }
}

#[derive(Debug, Default)]
struct ProjectDraft {
    name: String,
    description: String,
    technologies: Vec<String>,
    year: String,
}

impl ProjectDraft {
    fn finish(self) -> ProjectEntry {
        ProjectEntry {
            name: self.name,
            description: self.description,
            technologies: dedup_preserving_order(self.technologies),
            year: self.year,
        }
    }
}

/// The single "current item" slot. Exactly one entry may be open at a time;
/// flushing pushes it into the sequence of its own kind, so a section switch
/// mid-entry never discards or misfiles anything already accumulated.
#[derive(Debug)]
enum Pending {
    Work(WorkDraft),
    Project(ProjectDraft),
    Education(EducationEntry),
}

/// Converts unstructured resume plain text into a best-effort structured
/// record using line-by-line keyword and regex heuristics.
///
/// Behavior pinned by the regression tests below:
/// - section headers are detected first and carry no data themselves;
/// - the name heuristic fires at most once (first qualifying line wins);
/// - email and phone are last-match-wins across the whole document;
/// - in EXPERIENCE, any line with `|`, `-`, or a 4-digit year opens a new
///   entry, so a lone trailing year line yields a second, nearly-empty entry;
/// - in EDUCATION, every line is its own record, even continuations.
pub fn parse(content: &str) -> ParsedResume {
    let mut personal_info = PersonalInfo::default();
    let mut work: Vec<WorkDraft> = Vec::new();
    let mut projects: Vec<ProjectDraft> = Vec::new();
    let mut skills: Vec<String> = Vec::new();
    let mut education: Vec<EducationEntry> = Vec::new();

    let mut section = Section::None;
    let mut pending: Option<Pending> = None;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();

        // Section headers win over everything else on the line, including
        // any email or phone it might also contain.
        if lower.contains("experience") || lower.contains("employment") {
            section = Section::Experience;
            continue;
        } else if lower.contains("project") {
            section = Section::Projects;
            continue;
        } else if lower.contains("skill") {
            section = Section::Skills;
            continue;
        } else if lower.contains("education") {
            section = Section::Education;
            continue;
        }

        // Personal info is scanned on every data line regardless of section.
        if personal_info.name.is_none() && looks_like_name(line) {
            personal_info.name = Some(line.to_string());
        }
        if let Some(m) = EMAIL_RE.find(line) {
            personal_info.email = Some(m.as_str().to_string());
        }
        if let Some(m) = PHONE_RE.find(line) {
            personal_info.phone = Some(m.as_str().to_string());
        }

        match section {
            Section::Experience => {
                if line.contains('|') || line.contains('-') || YEAR_RE.is_match(line) {
                    flush(&mut pending, &mut work, &mut projects, &mut education);

                    let mut draft = WorkDraft::default();
                    let parts: Vec<&str> = line.split(['|', '-', '–']).collect();
                    if parts.len() >= 2 {
                        draft.position = parts[0].trim().to_string();
                        draft.company = parts[1].trim().to_string();
                    }
                    let years: Vec<&str> =
                        YEAR_RE.find_iter(line).map(|m| m.as_str()).collect();
                    if !years.is_empty() {
                        draft.duration = years.join(" - ");
                    }
                    pending = Some(Pending::Work(draft));
                } else if let Some(Pending::Work(draft)) = pending.as_mut() {
                    draft.description.push(line.to_string());
                    draft.technologies.extend(vocabulary::scan(line));
                }
            }
            Section::Projects => {
                if line.contains(':') || YEAR_RE.is_match(line) {
                    flush(&mut pending, &mut work, &mut projects, &mut education);

                    let mut draft = ProjectDraft::default();
                    match line.find(':') {
                        Some(idx) if idx > 0 => {
                            draft.name = line[..idx].trim().to_string();
                            draft.description = line[idx + 1..].trim().to_string();
                        }
                        _ => draft.name = line.to_string(),
                    }
                    if let Some(m) = YEAR_RE.find(line) {
                        draft.year = m.as_str().to_string();
                    }
                    pending = Some(Pending::Project(draft));
                } else if let Some(Pending::Project(draft)) = pending.as_mut() {
                    draft.description.push(' ');
                    draft.description.push_str(line);
                    draft.technologies.extend(vocabulary::scan(line));
                }
            }
            Section::Skills => {
                // Comma/bullet separated lists; no per-line entry concept.
                skills.extend(
                    line.split([',', '•', '·', '-', '*'])
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
            Section::Education => {
                // One record per line; no multi-line accumulation.
                flush(&mut pending, &mut work, &mut projects, &mut education);

                let mut entry = EducationEntry::default();
                if let Some(m) = YEAR_RE.find(line) {
                    entry.year = m.as_str().to_string();
                }
                if lower.contains("university")
                    || lower.contains("college")
                    || lower.contains("institute")
                {
                    entry.institution = line.to_string();
                } else {
                    entry.degree = line.to_string();
                }
                pending = Some(Pending::Education(entry));
            }
            Section::None => {}
        }
    }

    flush(&mut pending, &mut work, &mut projects, &mut education);

    let parsed = ParsedResume {
        personal_info,
        work_experience: work.into_iter().map(WorkDraft::finish).collect(),
        projects: projects.into_iter().map(ProjectDraft::finish).collect(),
        skills: dedup_preserving_order(skills),
        education,
    };

    debug!(
        work = parsed.work_experience.len(),
        projects = parsed.projects.len(),
        skills = parsed.skills.len(),
        education = parsed.education.len(),
        "segmented resume text"
    );

    parsed
}

/// A line qualifies as a name when it is more than 3 characters, contains
/// neither `@` nor `http`, and splits into 2-4 purely alphabetic tokens.
fn looks_like_name(line: &str) -> bool {
    if line.chars().count() <= 3 || line.contains('@') || line.contains("http") {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Pushes the open entry, if any, into the sequence of its own kind.
fn flush(
    pending: &mut Option<Pending>,
    work: &mut Vec<WorkDraft>,
    projects: &mut Vec<ProjectDraft>,
    education: &mut Vec<EducationEntry>,
) {
    match pending.take() {
        Some(Pending::Work(draft)) => work.push(draft),
        Some(Pending::Project(draft)) => projects.push(draft),
        Some(Pending::Education(entry)) => education.push(entry),
        None => {}
    }
}

/// Removes duplicates (case-sensitive), keeping the first occurrence of each
/// value. Idempotent: applying it twice yields the same sequence as once.
fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_record() {
        let parsed = parse("");
        assert_eq!(parsed, ParsedResume::default());
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["personalInfo"], serde_json::json!({}));
    }

    #[test]
    fn test_parse_terminates_on_unstructured_garbage() {
        let parsed = parse("\u{0}\u{1}\u{2}\nöäü ß 🙂\n----\n||||\n");
        assert!(parsed.personal_info.name.is_none());
        assert!(parsed.work_experience.is_empty());
    }

    #[test]
    fn test_contact_block_extraction() {
        let parsed = parse("John Smith\njohn@example.com\n555-123-4567");
        assert_eq!(parsed.personal_info.name.as_deref(), Some("John Smith"));
        assert_eq!(
            parsed.personal_info.email.as_deref(),
            Some("john@example.com")
        );
        assert_eq!(parsed.personal_info.phone.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_name_is_first_qualifying_line_only() {
        let parsed = parse("Jane Doe\nJohn Smith");
        assert_eq!(parsed.personal_info.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_rejects_urls_emails_and_long_token_runs() {
        assert!(parse("see http example").personal_info.name.is_none());
        assert!(parse("jane@doe.com lastname").personal_info.name.is_none());
        assert!(parse("One Two Three Four Five").personal_info.name.is_none());
        assert!(parse("Jane").personal_info.name.is_none());
        assert!(parse("Jane D0e").personal_info.name.is_none());
    }

    #[test]
    fn test_email_and_phone_are_last_match_wins() {
        let parsed = parse("old@example.com\nReferences available\nnew@example.com");
        assert_eq!(
            parsed.personal_info.email.as_deref(),
            Some("new@example.com")
        );

        let parsed = parse("(555) 111-2222\n555.333.4444");
        assert_eq!(parsed.personal_info.phone.as_deref(), Some("555.333.4444"));
    }

    #[test]
    fn test_section_header_line_never_contributes_personal_info() {
        // Header detection short-circuits the line before the email scan runs.
        let parsed = parse("EXPERIENCE jane@work.example");
        assert!(parsed.personal_info.email.is_none());
    }

    #[test]
    fn test_experience_entry_with_trailing_year_line_produces_two_entries() {
        // The lone "2020" line satisfies the entry-header rule (4-digit year)
        // and so opens a second, nearly-empty entry. Intentionally preserved.
        let parsed = parse(
            "EXPERIENCE\n\
             Senior Engineer - Acme Corp\n\
             Built scalable systems using Python and Docker\n\
             2020",
        );
        assert_eq!(parsed.work_experience.len(), 2);

        let first = &parsed.work_experience[0];
        assert_eq!(first.position, "Senior Engineer");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(
            first.description,
            "Built scalable systems using Python and Docker"
        );
        assert_eq!(first.technologies, vec!["Python", "Docker"]);
        assert_eq!(first.duration, "");

        let second = &parsed.work_experience[1];
        assert_eq!(second.duration, "2020");
        assert_eq!(second.position, "");
        assert_eq!(second.company, "");
        assert_eq!(second.description, "");
    }

    #[test]
    fn test_experience_header_with_pipes_and_years() {
        let parsed = parse("EMPLOYMENT\nStaff Engineer | Initech | 2019 2021");
        assert_eq!(parsed.work_experience.len(), 1);
        let entry = &parsed.work_experience[0];
        assert_eq!(entry.position, "Staff Engineer");
        assert_eq!(entry.company, "Initech");
        assert_eq!(entry.duration, "2019 - 2021");
    }

    #[test]
    fn test_experience_description_lines_before_any_header_are_dropped() {
        let parsed = parse("EXPERIENCE\nshipped things with Python");
        assert!(parsed.work_experience.is_empty());
    }

    #[test]
    fn test_experience_technologies_deduplicated_first_occurrence_wins() {
        let parsed = parse(
            "EXPERIENCE\n\
             Engineer | Acme\n\
             Python services talking to Python workers over SQL",
        );
        assert_eq!(
            parsed.work_experience[0].technologies,
            vec!["Python", "SQL"]
        );
    }

    #[test]
    fn test_multi_line_experience_description_is_space_joined() {
        let parsed = parse(
            "EXPERIENCE\n\
             Engineer | Acme\n\
             Owned the billing pipeline\n\
             and its React frontend",
        );
        assert_eq!(
            parsed.work_experience[0].description,
            "Owned the billing pipeline and its React frontend"
        );
        assert_eq!(parsed.work_experience[0].technologies, vec!["React"]);
    }

    #[test]
    fn test_project_with_colon_name_year_and_continuation() {
        let parsed = parse(
            "PROJECTS\n\
             Tickerboard: live market dashboard 2023\n\
             rendered with React",
        );
        assert_eq!(parsed.projects.len(), 1);
        let project = &parsed.projects[0];
        assert_eq!(project.name, "Tickerboard");
        assert_eq!(project.description, "live market dashboard 2023 rendered with React");
        assert_eq!(project.year, "2023");
        assert_eq!(project.technologies, vec!["React"]);
    }

    #[test]
    fn test_project_line_without_colon_uses_whole_line_as_name() {
        let parsed = parse("PROJECTS\nWeather station 2021");
        assert_eq!(parsed.projects[0].name, "Weather station 2021");
        assert_eq!(parsed.projects[0].description, "");
        assert_eq!(parsed.projects[0].year, "2021");
    }

    #[test]
    fn test_project_line_with_leading_colon_keeps_whole_line_as_name() {
        let parsed = parse("PROJECTS\n: odd formatting 2020");
        assert_eq!(parsed.projects[0].name, ": odd formatting 2020");
    }

    #[test]
    fn test_skills_split_on_separators_and_deduplicated() {
        let parsed = parse("SKILLS\nPython, SQL • Docker - AWS");
        assert_eq!(parsed.skills, vec!["Python", "SQL", "Docker", "AWS"]);

        let parsed = parse("SKILLS\nPython, SQL\nSQL * Python");
        assert_eq!(parsed.skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_education_emits_one_record_per_line() {
        // Regression: institution and degree on adjacent lines must stay two
        // separate records. Do not "fix" this by merging them.
        let parsed = parse("EDUCATION\nExample University\nB.S. Computer Science");
        assert_eq!(parsed.education.len(), 2);
        assert_eq!(parsed.education[0].institution, "Example University");
        assert_eq!(parsed.education[0].degree, "");
        assert_eq!(parsed.education[1].institution, "");
        assert_eq!(parsed.education[1].degree, "B.S. Computer Science");
    }

    #[test]
    fn test_education_captures_year_and_classifies_institutions() {
        let parsed = parse("EDUCATION\nState College 2018\nDiploma of Welding 2014");
        assert_eq!(parsed.education[0].institution, "State College 2018");
        assert_eq!(parsed.education[0].year, "2018");
        assert_eq!(parsed.education[1].degree, "Diploma of Welding 2014");
        assert_eq!(parsed.education[1].year, "2014");
    }

    #[test]
    fn test_section_switch_flushes_open_entry_into_its_own_sequence() {
        // An experience entry left open when the document moves on must land
        // in workExperience, not in the next section's output.
        let parsed = parse(
            "EXPERIENCE\n\
             Engineer | Acme\n\
             PROJECTS\n\
             Sideproject: a CLI toy",
        );
        assert_eq!(parsed.work_experience.len(), 1);
        assert_eq!(parsed.work_experience[0].company, "Acme");
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.projects[0].name, "Sideproject");
    }

    #[test]
    fn test_document_ending_mid_entry_flushes_exactly_once() {
        let parsed = parse("PROJECTS\nTrailblazer: half-written entry");
        assert_eq!(parsed.projects.len(), 1);
    }

    #[test]
    fn test_reasserted_section_header_switches_without_discarding() {
        let parsed = parse(
            "SKILLS\nPython\nEXPERIENCE\nEngineer | Acme\nMore skills\nSKILLS\nSQL",
        );
        assert_eq!(parsed.skills, vec!["Python", "SQL"]);
        assert_eq!(parsed.work_experience.len(), 1);
    }

    #[test]
    fn test_dedup_preserving_order_is_idempotent() {
        let once = dedup_preserving_order(vec![
            "Python".to_string(),
            "SQL".to_string(),
            "Python".to_string(),
        ]);
        let twice = dedup_preserving_order(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, vec!["Python", "SQL"]);
    }
}
