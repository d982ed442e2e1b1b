use crate::models::job::JobDescription;

/// Builds the analysis prompt sent to the LLM.
///
/// Total and deterministic: the same inputs always produce a byte-identical
/// prompt, and missing job fields render as empty strings. The prompt embeds
/// the résumé text verbatim and instructs the model to answer with only a
/// JSON object in the canonical result shape.
pub fn build_prompt(resume_text: &str, job: &JobDescription) -> String {
    let requirements = job
        .requirements
        .as_deref()
        .unwrap_or_default()
        .join(", ");

    format!(
        "Analyze the following resume and compare it against the provided job description.\n\n\
         RESUME:\n{resume}\n\n\
         JOB DESCRIPTION:\n\
         Title: {title}\n\
         Company: {company}\n\
         Description: {description}\n\
         Requirements: {requirements}\n\n\
         Please provide a detailed analysis in the following JSON format:\n\
         {{\n\
         \x20 \"compatibilityScore\": <number from 0 to 100>,\n\
         \x20 \"summary\": \"<2-3 paragraph summary of the analysis>\",\n\
         \x20 \"strengths\": [\"<strength 1>\", \"<strength 2>\", ...],\n\
         \x20 \"weaknesses\": [\"<weakness 1>\", \"<weakness 2>\", ...],\n\
         \x20 \"recommendations\": [\"<recommendation 1>\", \"<recommendation 2>\", ...],\n\
         \x20 \"isSuitable\": <true or false>\n\
         }}\n\n\
         IMPORTANT: Return ONLY the JSON, with no additional text before or after it.",
        resume = resume_text,
        title = job.title.as_deref().unwrap_or(""),
        company = job.company.as_deref().unwrap_or(""),
        description = job.description.as_deref().unwrap_or(""),
        requirements = requirements,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDescription {
        JobDescription {
            title: Some("Backend Engineer".to_string()),
            company: Some("Acme".to_string()),
            description: Some("Build services".to_string()),
            requirements: Some(vec![
                "Rust".to_string(),
                "SQL".to_string(),
                "HTTP".to_string(),
            ]),
            location: None,
            contract_type: None,
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_prompt("resume body", &job());
        let b = build_prompt("resume body", &job());
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_contains_resume_title_and_joined_requirements() {
        let prompt = build_prompt("Jane Doe, 10 years of Rust", &job());
        assert!(prompt.contains("Jane Doe, 10 years of Rust"));
        assert!(prompt.contains("Title: Backend Engineer"));
        assert!(prompt.contains("Requirements: Rust, SQL, HTTP"));
    }

    #[test]
    fn prompt_names_every_result_field() {
        let prompt = build_prompt("x", &job());
        for field in [
            "compatibilityScore",
            "summary",
            "strengths",
            "weaknesses",
            "recommendations",
            "isSuitable",
        ] {
            assert!(prompt.contains(field), "missing field {field}");
        }
    }

    #[test]
    fn missing_job_fields_render_as_empty_strings() {
        let prompt = build_prompt("x", &JobDescription::default());
        assert!(prompt.contains("Title: \n"));
        assert!(prompt.contains("Company: \n"));
        assert!(prompt.contains("Requirements: \n"));
    }
}
