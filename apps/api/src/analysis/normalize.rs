use serde_json::Value;

use crate::models::analysis::{AnalysisResult, DEFAULT_SCORE};

/// Turns parsed model JSON into a canonical [`AnalysisResult`].
///
/// Total function: any missing or type-mismatched field is replaced by its
/// documented default (score 50.0, empty summary, empty lists, not suitable).
/// Unknown fields are ignored.
pub fn normalize(json: &Value) -> AnalysisResult {
    AnalysisResult {
        compatibility_score: json
            .get("compatibilityScore")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_SCORE)
            .clamp(0.0, 100.0),
        summary: json
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        strengths: string_list(json.get("strengths")),
        weaknesses: string_list(json.get("weaknesses")),
        recommendations: string_list(json.get("recommendations")),
        is_suitable: json
            .get("isSuitable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// Coerces a JSON array into strings, preserving order. Non-string elements
/// keep their JSON rendering; a missing or non-array value yields an empty
/// list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item.as_str() {
                    Some(s) => s.to_string(),
                    None => item.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_all_defaults() {
        let result = normalize(&json!({}));
        assert_eq!(result.compatibility_score, DEFAULT_SCORE);
        assert_eq!(result.summary, "");
        assert!(result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
        assert!(result.recommendations.is_empty());
        assert!(!result.is_suitable);
    }

    #[test]
    fn fully_populated_object_round_trips() {
        let result = normalize(&json!({
            "compatibilityScore": 87.5,
            "summary": "Strong match.",
            "strengths": ["Rust", "Databases"],
            "weaknesses": ["No cloud experience"],
            "recommendations": ["Learn Kubernetes"],
            "isSuitable": true
        }));
        assert_eq!(result.compatibility_score, 87.5);
        assert_eq!(result.summary, "Strong match.");
        assert_eq!(result.strengths, vec!["Rust", "Databases"]);
        assert_eq!(result.weaknesses, vec!["No cloud experience"]);
        assert_eq!(result.recommendations, vec!["Learn Kubernetes"]);
        assert!(result.is_suitable);
    }

    #[test]
    fn integer_score_is_accepted() {
        let result = normalize(&json!({"compatibilityScore": 90}));
        assert_eq!(result.compatibility_score, 90.0);
    }

    #[test]
    fn out_of_range_score_is_clamped() {
        assert_eq!(
            normalize(&json!({"compatibilityScore": 140})).compatibility_score,
            100.0
        );
        assert_eq!(
            normalize(&json!({"compatibilityScore": -5})).compatibility_score,
            0.0
        );
    }

    #[test]
    fn mismatched_types_fall_back_to_defaults() {
        let result = normalize(&json!({
            "compatibilityScore": "high",
            "summary": 42,
            "strengths": "not a list",
            "isSuitable": "yes"
        }));
        assert_eq!(result.compatibility_score, DEFAULT_SCORE);
        assert_eq!(result.summary, "");
        assert!(result.strengths.is_empty());
        assert!(!result.is_suitable);
    }

    #[test]
    fn non_string_list_elements_are_coerced_in_order() {
        let result = normalize(&json!({"strengths": ["a", 2, true]}));
        assert_eq!(result.strengths, vec!["a", "2", "true"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result = normalize(&json!({"summary": "ok", "confidence": 0.9}));
        assert_eq!(result.summary, "ok");
    }
}
