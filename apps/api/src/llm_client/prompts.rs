//! Prompt templates for the portfolio chat and resume analysis calls.

/// System prompt for the portfolio chat widget. Embeds the full resume
/// context as JSON so the model can quote concrete details.
pub fn chat_system(owner_name: &str, resume_json: &str) -> String {
    format!(
        "You are an AI assistant for {owner_name}'s personal portfolio website. \
         You have access to their complete resume and professional background. \
         Here is their data:\n\n{resume_json}\n\n\
         Provide detailed, personalized responses about {owner_name}'s background, \
         experience, skills, and career journey. Be specific and reference actual \
         details from the resume. Always respond in a professional yet approachable \
         tone."
    )
}

/// System prompt for the structured resume analysis run in JSON mode.
pub const RESUME_ANALYSIS_SYSTEM: &str = "You are an expert resume analyzer. Parse the \
    resume content and extract structured information. Return your analysis in JSON \
    format with the following structure: { \"personalInfo\": {\"name\", \"email\", \
    \"phone\"}, \"workExperience\": [{\"company\", \"position\", \"duration\", \
    \"description\", \"technologies\"}], \"projects\": [{\"name\", \"description\", \
    \"technologies\", \"year\"}], \"skills\": [string array], \"education\": \
    [{\"institution\", \"degree\", \"year\"}], \"analysis\": {\"completeness\": \
    number(0-100), \"strengths\": [string], \"improvements\": [string]} }";

/// User prompt wrapping the raw resume text for analysis.
pub fn resume_analysis_prompt(content: &str) -> String {
    format!("Please analyze this resume and extract structured information:\n\n{content}")
}

/// System prompt for one-shot quick-action answers.
pub fn quick_answer_system(resume_json: &str) -> String {
    format!(
        "You are an AI career assistant. Answer the visitor's question using this \
         resume information: {resume_json}. Keep responses concise but informative."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_system_embeds_owner_and_context() {
        let prompt = chat_system("Avery Collins", r#"{"skills": ["Python"]}"#);
        assert!(prompt.contains("Avery Collins's personal portfolio website"));
        assert!(prompt.contains(r#"{"skills": ["Python"]}"#));
    }

    #[test]
    fn test_analysis_system_names_every_output_section() {
        for key in [
            "personalInfo",
            "workExperience",
            "projects",
            "skills",
            "education",
            "analysis",
        ] {
            assert!(RESUME_ANALYSIS_SYSTEM.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_quick_answer_system_embeds_context() {
        let prompt = quick_answer_system("{}");
        assert!(prompt.contains("{}"));
    }
}
