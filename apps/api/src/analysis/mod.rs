//! The AI-analysis core: prompt construction, completion parsing, result
//! normalization, and the service that orchestrates a provider call.

pub mod extract;
pub mod handlers;
pub mod normalize;
pub mod prompt;
pub mod service;

pub use service::{AnalysisRequest, AnalysisService};
