//! LinkedIn profile handling: structured-profile-to-text formatting plus
//! profile URL validation.
//!
//! Automatic extraction from a URL is deliberately unimplemented: it would
//! require LinkedIn OAuth and API access (or scraping). The URL is only
//! validated and its identifier extracted for the error message.

use serde::{Deserialize, Serialize};

const SECTION_RULE: &str =
    "==================================================";
const ENTRY_RULE: &str =
    "--------------------------------------------------";

/// Structured profile data supplied inline by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub role: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub course: Option<String>,
    pub period: Option<String>,
}

/// Renders a profile into the plain text fed to the analysis core.
/// Pure formatting: deterministic, skips absent sections, no fallback logic.
pub fn profile_to_text(profile: &ProfileData) -> String {
    let mut text = String::new();

    if let Some(name) = &profile.name {
        text.push_str(&format!("Name: {name}\n\n"));
    }
    if let Some(headline) = &profile.headline {
        text.push_str(&format!("Professional Title: {headline}\n\n"));
    }
    if let Some(location) = &profile.location {
        text.push_str(&format!("Location: {location}\n\n"));
    }
    if let Some(summary) = &profile.summary {
        text.push_str(&format!("Professional Summary:\n{summary}\n\n"));
    }

    if !profile.experience.is_empty() {
        text.push_str(&format!("PROFESSIONAL EXPERIENCE:\n{SECTION_RULE}\n"));
        for entry in &profile.experience {
            text.push_str(&format!(
                "\nRole: {}\nCompany: {}",
                entry.role.as_deref().unwrap_or("N/A"),
                entry.company.as_deref().unwrap_or("N/A"),
            ));
            if let Some(period) = &entry.period {
                text.push_str(&format!("\nPeriod: {period}"));
            }
            if let Some(description) = &entry.description {
                if !description.trim().is_empty() {
                    text.push_str(&format!("\nDescription: {description}"));
                }
            }
            text.push_str(&format!("\n{ENTRY_RULE}\n"));
        }
        text.push('\n');
    }

    if !profile.education.is_empty() {
        text.push_str(&format!("EDUCATION:\n{SECTION_RULE}\n"));
        for entry in &profile.education {
            text.push_str(&format!(
                "\nCourse: {}\nInstitution: {}",
                entry.course.as_deref().unwrap_or("N/A"),
                entry.institution.as_deref().unwrap_or("N/A"),
            ));
            if let Some(period) = &entry.period {
                text.push_str(&format!("\nPeriod: {period}"));
            }
            text.push_str(&format!("\n{ENTRY_RULE}\n"));
        }
        text.push('\n');
    }

    if !profile.skills.is_empty() {
        text.push_str(&format!(
            "SKILLS:\n{SECTION_RULE}\n{}\n\n",
            profile.skills.join(", ")
        ));
    }
    if !profile.certifications.is_empty() {
        text.push_str(&format!(
            "CERTIFICATIONS:\n{SECTION_RULE}\n{}\n\n",
            profile.certifications.join("\n")
        ));
    }
    if !profile.languages.is_empty() {
        text.push_str(&format!(
            "LANGUAGES:\n{SECTION_RULE}\n{}\n\n",
            profile.languages.join(", ")
        ));
    }

    text
}

/// Accepts the two public profile URL shapes LinkedIn has used.
pub fn is_valid_profile_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }
    url.contains("linkedin.com/in/") || url.contains("linkedin.com/profile/view")
}

/// Pulls the public identifier out of a `linkedin.com/in/{id}` URL.
pub fn extract_profile_id(url: &str) -> Option<&str> {
    let url = url.trim();
    let start = url.find("/in/")? + 4;
    let rest = &url[start..];
    let id = rest.split('/').next().unwrap_or(rest);
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> ProfileData {
        ProfileData {
            name: Some("Jane Doe".to_string()),
            headline: Some("Senior Backend Engineer".to_string()),
            location: Some("Lisbon".to_string()),
            summary: Some("Ten years building services.".to_string()),
            experience: vec![ExperienceEntry {
                company: Some("Acme".to_string()),
                role: Some("Engineer".to_string()),
                period: Some("2019-2024".to_string()),
                description: Some("Built the billing platform.".to_string()),
            }],
            education: vec![EducationEntry {
                institution: Some("IST".to_string()),
                course: Some("CS".to_string()),
                period: None,
            }],
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
            certifications: vec!["AWS SAA".to_string()],
            languages: vec!["English".to_string(), "Portuguese".to_string()],
        }
    }

    #[test]
    fn formats_every_present_section() {
        let text = profile_to_text(&sample_profile());
        assert!(text.contains("Name: Jane Doe"));
        assert!(text.contains("PROFESSIONAL EXPERIENCE:"));
        assert!(text.contains("Role: Engineer"));
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("EDUCATION:"));
        assert!(text.contains("SKILLS:\n"));
        assert!(text.contains("Rust, Postgres"));
        assert!(text.contains("English, Portuguese"));
    }

    #[test]
    fn empty_profile_renders_empty_text() {
        assert_eq!(profile_to_text(&ProfileData::default()), "");
    }

    #[test]
    fn formatting_is_deterministic() {
        assert_eq!(
            profile_to_text(&sample_profile()),
            profile_to_text(&sample_profile())
        );
    }

    #[test]
    fn missing_role_and_company_render_as_na() {
        let profile = ProfileData {
            experience: vec![ExperienceEntry::default()],
            ..Default::default()
        };
        let text = profile_to_text(&profile);
        assert!(text.contains("Role: N/A"));
        assert!(text.contains("Company: N/A"));
    }

    #[test]
    fn validates_profile_urls() {
        assert!(is_valid_profile_url("https://www.linkedin.com/in/jane-doe/"));
        assert!(is_valid_profile_url("https://linkedin.com/profile/view?id=1"));
        assert!(!is_valid_profile_url("https://example.com/in/jane"));
        assert!(!is_valid_profile_url(""));
    }

    #[test]
    fn extracts_profile_id_with_and_without_trailing_slash() {
        assert_eq!(
            extract_profile_id("https://www.linkedin.com/in/jane-doe/"),
            Some("jane-doe")
        );
        assert_eq!(
            extract_profile_id("https://www.linkedin.com/in/jane-doe"),
            Some("jane-doe")
        );
        assert_eq!(extract_profile_id("https://www.linkedin.com/feed/"), None);
    }
}
