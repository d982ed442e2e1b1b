use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::analysis::AnalysisRequest;
use crate::errors::AppError;
use crate::extractor::extract_text;
use crate::linkedin::{self, ProfileData};
use crate::models::analysis::AnalysisResult;
use crate::models::job::JobDescription;
use crate::state::AppState;

/// POST /api/analyze
///
/// Multipart form: `resume` (file) + `job` (JSON-encoded JobDescription).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job: Option<JobDescription> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::Validation("Resume file must have a filename".to_string())
                    })?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume file: {e}")))?;
                resume = Some((filename, data));
            }
            "job" => {
                let raw = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job description: {e}"))
                })?;
                job = Some(serde_json::from_str(&raw).map_err(|e| {
                    AppError::Validation(format!("Invalid job description JSON: {e}"))
                })?);
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (filename, data) =
        resume.ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;
    let job = job.ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    if data.is_empty() {
        return Err(AppError::Validation(
            "Resume file must not be empty".to_string(),
        ));
    }

    let resume_text = extract_text(&filename, &data)?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract any text from the resume".to_string(),
        ));
    }

    info!(
        "analyzing uploaded resume '{filename}' ({} bytes of text)",
        resume_text.len()
    );

    let result = state
        .analysis
        .analyze(&AnalysisRequest { resume_text, job })
        .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysisRequest {
    pub profile_data: Option<ProfileData>,
    pub linkedin_url: Option<String>,
    pub job: Option<JobDescription>,
}

/// POST /api/analyze/linkedin
///
/// Accepts either inline profile data or a profile URL. The URL path is
/// validated and then refused as unimplemented, by design (see `linkedin`).
pub async fn handle_analyze_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileAnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let job = request
        .job
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    let resume_text = if let Some(profile) = &request.profile_data {
        let text = linkedin::profile_to_text(profile);
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Could not process the profile data".to_string(),
            ));
        }
        text
    } else if let Some(url) = request.linkedin_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !linkedin::is_valid_profile_url(url) {
            return Err(AppError::Validation(
                "Invalid LinkedIn URL. Provide a valid profile URL or the profile data directly."
                    .to_string(),
            ));
        }
        let profile_id = linkedin::extract_profile_id(url).unwrap_or("unknown");
        return Err(AppError::NotImplemented(format!(
            "Automatic profile extraction from a URL is not implemented. \
             Provide the profile data directly in 'profileData'. \
             URL received: {url} (profile '{profile_id}')"
        )));
    } else {
        return Err(AppError::Validation(
            "Provide a LinkedIn URL or the profile data (profileData)".to_string(),
        ));
    };

    info!("analyzing inline profile ({} bytes of text)", resume_text.len());

    let result = state
        .analysis
        .analyze(&AnalysisRequest { resume_text, job })
        .await?;
    Ok(Json(result))
}
