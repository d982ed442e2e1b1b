use serde::{Deserialize, Serialize};

/// Default compatibility score used when the model response carries no usable
/// score, including the degraded-result path.
pub const DEFAULT_SCORE: f64 = 50.0;

/// The canonical analysis record returned to callers.
///
/// Every field is always populated: absent or malformed source fields are
/// replaced by defaults in the normalizer, never left null on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub compatibility_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub is_suitable: bool,
}

impl AnalysisResult {
    /// Degraded result produced when an upstream completion was obtained but
    /// could not be parsed as structured JSON. Carries the raw response text
    /// verbatim as the summary so the caller still sees what the model said.
    pub fn degraded(raw_response: &str) -> Self {
        Self {
            compatibility_score: DEFAULT_SCORE,
            summary: raw_response.to_string(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            recommendations: Vec::new(),
            is_suitable: false,
        }
    }
}
