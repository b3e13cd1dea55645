//! Response extraction
//!
//! Turns free-form model text into either a JSON array (analyze) or plain
//! source code (fix). Both modes are idempotent on clean input.
//!
//! Array mode slices from the first `[` to the last `]`. Brackets in
//! commentary around the payload corrupt that slice; such replies surface as
//! `MalformedReason::Json`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::llm::types::AuditResult;

const FENCE: &str = "```";

/// Opening fence with an optional language tag and the whitespace after it
static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```[A-Za-z0-9_+\-]*\s*").expect("opening fence pattern is valid")
});

/// Why a model reply could not be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("no JSON array found")]
    NoArrayBounds,

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("unexpected shape: {0}")]
    Shape(String),
}

/// A reply the extractor rejected, with the text the model sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed model response: {reason}")]
pub struct MalformedResponse {
    pub raw: String,
    pub reason: MalformedReason,
}

impl MalformedResponse {
    fn new(raw: &str, reason: MalformedReason) -> Self {
        Self {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Trim, then drop a leading fence (with language tag) and a trailing fence
///
/// Text that does not start with a fence is only trimmed.
pub fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }

    let without_open = OPENING_FENCE.replace(trimmed, "");
    let without_close = without_open
        .strip_suffix(FENCE)
        .unwrap_or(&without_open);
    without_close.trim().to_string()
}

/// Array mode: the inclusive `[`..`]` slice of the de-fenced text
pub fn extract_json_array(text: &str) -> Result<String, MalformedResponse> {
    let cleaned = strip_fences(text);

    let bounds = cleaned
        .find('[')
        .zip(cleaned.rfind(']'))
        .filter(|(first, last)| first < last);

    match bounds {
        Some((first, last)) => Ok(cleaned[first..=last].to_string()),
        None => {
            tracing::debug!(len = text.len(), "Model reply has no JSON array bounds");
            Err(MalformedResponse::new(text, MalformedReason::NoArrayBounds))
        }
    }
}

/// Array mode followed by a JSON parse
pub fn parse_json_array(text: &str) -> Result<Value, MalformedResponse> {
    let slice = extract_json_array(text)?;
    serde_json::from_str(&slice)
        .map_err(|e| MalformedResponse::new(text, MalformedReason::Json(e.to_string())))
}

/// Array mode followed by the `AuditResult` shape check
pub fn parse_audit_result(text: &str) -> Result<AuditResult, MalformedResponse> {
    let value = parse_json_array(text)?;
    serde_json::from_value(value)
        .map_err(|e| MalformedResponse::new(text, MalformedReason::Shape(e.to_string())))
}

/// Code mode: de-fenced text, otherwise unchanged
pub fn extract_code(text: &str) -> String {
    strip_fences(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_array_unchanged() {
        assert_eq!(extract_json_array("[1,2,3]").unwrap(), "[1,2,3]");
        assert_eq!(parse_json_array("[1,2,3]").unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_fenced_json_matches_unwrapped() {
        let fenced = "```json\n[{\"a\": 1}]\n```";
        assert_eq!(
            parse_json_array(fenced).unwrap(),
            parse_json_array("[{\"a\": 1}]").unwrap()
        );
    }

    #[test]
    fn test_bare_fence_without_language_tag() {
        assert_eq!(extract_json_array("```\n[true]\n```").unwrap(), "[true]");
    }

    #[test]
    fn test_commentary_around_array() {
        let text = "Sure! [1,2,3] Hope that helps.";
        assert_eq!(extract_json_array(text).unwrap(), "[1,2,3]");
        assert_eq!(parse_json_array(text).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_missing_open_bracket() {
        let err = extract_json_array("no array here ]").unwrap_err();
        assert_eq!(err.reason, MalformedReason::NoArrayBounds);
        assert_eq!(err.raw, "no array here ]");
    }

    #[test]
    fn test_missing_close_bracket() {
        let err = extract_json_array("[ not closed").unwrap_err();
        assert_eq!(err.reason, MalformedReason::NoArrayBounds);
        assert_eq!(err.raw, "[ not closed");
    }

    #[test]
    fn test_close_before_open() {
        let err = extract_json_array("] backwards [").unwrap_err();
        assert_eq!(err.reason, MalformedReason::NoArrayBounds);
    }

    #[test]
    fn test_invalid_json_is_distinct_reason() {
        let err = parse_json_array("[1, 2,, 3]").unwrap_err();
        assert!(matches!(err.reason, MalformedReason::Json(_)));
        assert_eq!(err.raw, "[1, 2,, 3]");
    }

    #[test]
    fn test_brackets_in_commentary_corrupt_slice() {
        let err = parse_json_array("Note [1] below:\n[2, 3]").unwrap_err();
        assert!(matches!(err.reason, MalformedReason::Json(_)));
    }

    #[test]
    fn test_array_mode_idempotent() {
        let once = extract_json_array("```json\n[1, [2]]\n```").unwrap();
        assert_eq!(extract_json_array(&once).unwrap(), once);
    }

    #[test]
    fn test_code_mode_strips_solidity_fence() {
        let text = "```solidity\npragma solidity ^0.8.0;\n```";
        assert_eq!(extract_code(text), "pragma solidity ^0.8.0;");
    }

    #[test]
    fn test_code_mode_leaves_unfenced_text() {
        let code = "pragma solidity ^0.8.0;\ncontract A {}";
        assert_eq!(extract_code(&format!("\n  {}\n", code)), code);
    }

    #[test]
    fn test_code_mode_idempotent() {
        let once = extract_code("```sol\ncontract A {}\n```");
        assert_eq!(extract_code(&once), once);
    }

    #[test]
    fn test_code_mode_without_closing_fence() {
        assert_eq!(extract_code("```solidity\ncontract A {}"), "contract A {}");
    }

    #[test]
    fn test_parse_audit_result_from_fenced_reply() {
        let reply = r#"```json
[
  {"section": "Audit Report", "details": "ok"},
  {"section": "Metric Scores", "details": [{"metric": "Security", "score": 10}]},
  {"section": "Suggestions for Improvement", "details": "none"}
]
```"#;
        let result = parse_audit_result(reply).unwrap();
        assert_eq!(result.report(), "ok");
        assert_eq!(result.score_for("Security"), Some(10));
    }

    #[test]
    fn test_parse_audit_result_unknown_section_is_shape_error() {
        let reply = r#"[{"section": "Summary", "details": "x"}]"#;
        let err = parse_audit_result(reply).unwrap_err();
        assert!(matches!(err.reason, MalformedReason::Shape(_)));
        assert_eq!(err.raw, reply);
    }

    #[test]
    fn test_parse_audit_result_negative_score_is_shape_error() {
        let reply = r#"[
  {"section": "Audit Report", "details": "x"},
  {"section": "Metric Scores", "details": [{"metric": "Security", "score": -1}]},
  {"section": "Suggestions for Improvement", "details": "y"}
]"#;
        let err = parse_audit_result(reply).unwrap_err();
        assert!(matches!(err.reason, MalformedReason::Shape(_)));
    }
}
