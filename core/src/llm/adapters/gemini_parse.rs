//! Gemini response parsing
//!
//! Public functions for building `generateContent` requests and reading
//! their responses.

use serde::{Deserialize, Serialize};

use crate::llm::adapters::GatewayError;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub role: &'a str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Build the single-turn request body for a prompt
pub fn build_generate_request(prompt: &str) -> Result<String, GatewayError> {
    let request = GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

/// Parse a `generateContent` response body
///
/// Returns the first candidate's text parts concatenated with no separator.
/// Parts without text are skipped.
pub fn parse_generate_content(response: &str) -> Result<String, GatewayError> {
    let parsed: GenerateContentResponse = serde_json::from_str(response)?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("no candidates (blocked: {})", r))
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GatewayError::InvalidResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GatewayError::InvalidResponse(
            "Missing candidates[0].content.parts[].text".to_string(),
        ));
    }

    Ok(text)
}
