use serde::{Deserialize, Serialize};

/// A job description as supplied by the caller. Every field is optional
/// pass-through data; missing fields render as empty strings at prompt time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub location: Option<String>,
    pub contract_type: Option<String>,
}
