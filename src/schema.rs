//! Schema operations for the analysis response contract.
//!
//! `describe_schema` renders the machine-readable shape of
//! [`AnalysisResponse`] for embedding into the model prompt, and `parse`
//! validates the model's raw text output back into that shape. Both are
//! generated from the same type definitions in `types::review`.

use lazy_static::lazy_static;
use regex::Regex;
use schemars::schema_for;

use crate::errors::SchemaError;
use crate::types::review::AnalysisResponse;

lazy_static! {
    // Reasoning models wrap deliberation in <think> tags despite instructions.
    static ref RE_THINK_TAGS: Regex = Regex::new(r"(?s)<think>.*?</think>").unwrap();
    // A single markdown code fence around the whole payload, with an
    // optional language tag after the opening backticks.
    static ref RE_CODE_FENCE: Regex =
        Regex::new(r"(?s)^```[a-zA-Z0-9_-]*\s*(.*?)\s*```$").unwrap();
    static ref FORMAT_INSTRUCTIONS: String = build_format_instructions();
}

fn build_format_instructions() -> String {
    let schema = schema_for!(AnalysisResponse);
    let schema_json =
        serde_json::to_string_pretty(&schema).expect("analysis schema serializes to JSON");
    format!(
        "The output must be a JSON instance that conforms to the JSON schema below.\n\n{}",
        schema_json
    )
}

/// Returns the textual specification of the analysis response shape, suitable
/// as model-steering instructions. Built once; identical on every call.
pub fn describe_schema() -> &'static str {
    &FORMAT_INSTRUCTIONS
}

/// Strips reasoning tags and a surrounding markdown code fence from raw model
/// output. Content that is neither fenced nor tagged passes through trimmed.
pub fn clean_model_output(text: &str) -> String {
    let without_think = RE_THINK_TAGS.replace_all(text, "");
    let trimmed = without_think.trim();
    match RE_CODE_FENCE.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    }
}

/// Parses raw model output as JSON and validates it against the analysis
/// response schema.
///
/// Validation is strict: unknown `type`/`severity` values and a `final_score`
/// outside `[0, 100]` are rejected. Missing fields, mistyped fields, and
/// non-JSON text fail with the corresponding [`SchemaError`] variant.
pub fn parse(raw: &str) -> Result<AnalysisResponse, SchemaError> {
    let cleaned = clean_model_output(raw);
    if cleaned.is_empty() {
        return Err(SchemaError::EmptyOutput);
    }

    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(SchemaError::InvalidJson)?;
    let response: AnalysisResponse =
        serde_json::from_value(value).map_err(SchemaError::SchemaMismatch)?;

    let final_score = response.quality_score.final_score;
    if !(0..=100).contains(&final_score) {
        return Err(SchemaError::ScoreOutOfRange(final_score));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::review::{IssueType, Severity};

    fn valid_response_json() -> String {
        serde_json::json!({
            "review": [{
                "type": "Bug",
                "line": 1,
                "description": "Division by zero",
                "suggestion": "Guard the divisor",
                "severity": "HIGH"
            }],
            "documentation": {
                "summary": "Divides numbers",
                "function_docs": "def f(): ...",
                "developer_notes": "None"
            },
            "test_cases": {
                "unit_tests": "def test_f(): ...",
                "edge_cases": ["zero divisor"],
                "risk_assessment": "High risk of runtime errors"
            },
            "quality_score": {
                "cyclomatic_complexity": "Low",
                "maintainability_index": 70,
                "security_risk": "Low",
                "final_score": 42
            }
        })
        .to_string()
    }

    #[test]
    fn test_describe_schema_is_deterministic() {
        let first = describe_schema();
        let second = describe_schema();
        assert_eq!(first, second);
        assert!(first.contains("final_score"));
        assert!(first.contains("quality_score"));
        assert!(first.contains("edge_cases"));
    }

    #[test]
    fn test_describe_schema_embeds_field_descriptions() {
        // Doc comments on the schema types double as prompt descriptions.
        let schema_text = describe_schema();
        assert!(schema_text.contains("Line number where the issue occurs"));
        assert!(schema_text.contains("Overall score 0-100"));
    }

    #[test]
    fn test_parse_valid_response() {
        let response = parse(&valid_response_json()).unwrap();
        assert_eq!(response.review.len(), 1);
        assert_eq!(response.review[0].r#type, IssueType::Bug);
        assert_eq!(response.review[0].severity, Severity::High);
        assert_eq!(response.quality_score.final_score, 42);
    }

    #[test]
    fn test_parse_is_idempotent_on_well_formed_input() {
        let response = parse(&valid_response_json()).unwrap();
        let serialized = serde_json::to_string(&response).unwrap();
        let reparsed = parse(&serialized).unwrap();
        assert_eq!(response, reparsed);
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let fenced = format!("```json\n{}\n```", valid_response_json());
        let response = parse(&fenced).unwrap();
        assert_eq!(response.review[0].r#type, IssueType::Bug);
    }

    #[test]
    fn test_parse_strips_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```", valid_response_json());
        assert!(parse(&fenced).is_ok());
    }

    #[test]
    fn test_parse_strips_think_tags() {
        let tagged = format!("<think>score it low</think>\n{}", valid_response_json());
        assert!(parse(&tagged).is_ok());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(parse(""), Err(SchemaError::EmptyOutput)));
        assert!(matches!(parse("   \n"), Err(SchemaError::EmptyOutput)));
        // A fence wrapping nothing is also empty output.
        assert!(matches!(parse("```json\n```"), Err(SchemaError::EmptyOutput)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let trailing_comma = r#"{"review": [],}"#;
        assert!(matches!(
            parse(trailing_comma),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_required_field() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_response_json()).unwrap();
        value.as_object_mut().unwrap().remove("quality_score");
        assert!(matches!(
            parse(&value.to_string()),
            Err(SchemaError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_parse_rejects_mistyped_field() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_response_json()).unwrap();
        value["quality_score"]["final_score"] = serde_json::json!("92");
        assert!(matches!(
            parse(&value.to_string()),
            Err(SchemaError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_enum_value() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_response_json()).unwrap();
        value["review"][0]["severity"] = serde_json::json!("CRITICAL");
        assert!(matches!(
            parse(&value.to_string()),
            Err(SchemaError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_parse_rejects_score_out_of_range() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_response_json()).unwrap();
        value["quality_score"]["final_score"] = serde_json::json!(147);
        assert!(matches!(
            parse(&value.to_string()),
            Err(SchemaError::ScoreOutOfRange(147))
        ));
    }

    #[test]
    fn test_clean_model_output_passthrough() {
        assert_eq!(clean_model_output("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
