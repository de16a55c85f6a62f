//! Forwarding gateway — the three generation endpoints and the outbound
//! payload construction they share.
//!
//! Each operation maps one inbound request to exactly one upstream call and
//! relays the upstream JSON back unmodified. The gateway never interprets
//! the upstream payload beyond an optional diagnostic preview; navigating
//! candidates/content/parts is the caller's concern.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::gemini::{GenerateContentRequest, GenerationConfig, UpstreamClient};

// ────────────────────────────────────────────────────────────────────────────
// Inbound request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub prompt: String,
    /// Optional structured-response schema, passed through to the upstream
    /// untouched. Its internal shape is the upstream's problem, not ours.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// Conversation turns are kept as raw JSON and forwarded verbatim; the
/// gateway only checks that there is at least one turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub contents: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisRequest {
    pub resume_text: String,
    pub job_title: String,
    pub required_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Roadmap generation: wraps the caller's prompt in the upstream message
/// envelope, optionally constraining the response to the supplied schema.
pub async fn generate_roadmap(
    upstream: &dyn UpstreamClient,
    request: RoadmapRequest,
) -> Result<Value, AppError> {
    info!("Generating roadmap for prompt: {}", request.prompt);

    let payload = roadmap_payload(&request.prompt, request.schema);
    let response = upstream.generate_content(&payload).await?;

    if let Some(preview) = response_text_preview(&response) {
        debug!("AI response received: {preview}...");
    }

    Ok(response)
}

/// Chat: forwards the caller's turns verbatim.
pub async fn chat(upstream: &dyn UpstreamClient, request: ChatRequest) -> Result<Value, AppError> {
    let payload = chat_payload(request.contents);
    let response = upstream.generate_content(&payload).await?;
    Ok(response)
}

/// Resume analysis: the one endpoint that synthesizes its prompt
/// server-side before forwarding.
pub async fn analyze_resume(
    upstream: &dyn UpstreamClient,
    request: ResumeAnalysisRequest,
) -> Result<Value, AppError> {
    info!("Analyzing resume for position: {}", request.job_title);

    let prompt = prompts::build_resume_analysis_prompt(
        &request.job_title,
        &request.required_skills,
        &request.resume_text,
    );
    let payload = resume_analysis_payload(&prompt);
    let response = upstream.generate_content(&payload).await?;
    Ok(response)
}

// ────────────────────────────────────────────────────────────────────────────
// Payload construction
// ────────────────────────────────────────────────────────────────────────────

fn roadmap_payload(prompt: &str, schema: Option<Value>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: single_turn_contents(prompt),
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: 8192,
            response_mime_type: schema.is_some().then_some("application/json"),
            response_schema: schema,
        },
    }
}

fn chat_payload(contents: Value) -> GenerateContentRequest {
    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: 2048,
            response_mime_type: None,
            response_schema: None,
        },
    }
}

fn resume_analysis_payload(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: single_turn_contents(prompt),
        generation_config: GenerationConfig {
            temperature: 0.5,
            top_k: None,
            top_p: None,
            max_output_tokens: 2048,
            response_mime_type: None,
            response_schema: None,
        },
    }
}

/// Wraps a single server-built prompt in the upstream's content envelope.
fn single_turn_contents(prompt: &str) -> Value {
    json!([{ "parts": [{ "text": prompt }] }])
}

/// First ~200 characters of the first candidate's text, for the roadmap
/// diagnostic trace. Returns `None` when the payload has no text there.
fn response_text_preview(payload: &Value) -> Option<String> {
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")?
        .as_str()?;
    Some(text.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_payload_passes_schema_through_unmodified() {
        let schema = json!({
            "type": "object",
            "properties": {
                "milestones": { "type": "array", "items": { "type": "string" } }
            }
        });

        let payload = roadmap_payload("Plan my career", Some(schema.clone()));

        assert_eq!(payload.generation_config.response_schema, Some(schema));
        assert_eq!(
            payload.generation_config.response_mime_type,
            Some("application/json")
        );
    }

    #[test]
    fn roadmap_payload_without_schema_requests_plain_output() {
        let payload = roadmap_payload("Plan my career", None);

        let wire = serde_json::to_value(&payload.generation_config).unwrap();
        assert_eq!(
            wire,
            json!({
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 8192
            })
        );
    }

    #[test]
    fn roadmap_payload_wraps_prompt_in_message_envelope() {
        let payload = roadmap_payload("Plan my career", None);
        assert_eq!(
            payload.contents,
            json!([{ "parts": [{ "text": "Plan my career" }] }])
        );
    }

    #[test]
    fn chat_payload_forwards_contents_verbatim() {
        // Includes a field the gateway does not model; it must survive.
        let contents = json!([
            { "role": "user", "parts": [{ "text": "hello" }] },
            { "role": "model", "parts": [{ "inlineData": { "mimeType": "image/png", "data": "aGk=" } }] }
        ]);

        let payload = chat_payload(contents.clone());

        assert_eq!(payload.contents, contents);
        assert_eq!(payload.generation_config.max_output_tokens, 2048);
        assert!(payload.generation_config.response_schema.is_none());
    }

    #[test]
    fn resume_analysis_payload_uses_conservative_sampling() {
        let payload = resume_analysis_payload("analysis prompt");

        let wire = serde_json::to_value(&payload.generation_config).unwrap();
        assert_eq!(
            wire,
            json!({ "temperature": 0.5, "maxOutputTokens": 2048 })
        );
    }

    #[test]
    fn response_text_preview_truncates_to_200_chars() {
        let long_text = "x".repeat(500);
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": long_text }] } }]
        });

        let preview = response_text_preview(&payload).unwrap();
        assert_eq!(preview.chars().count(), 200);
    }

    #[test]
    fn response_text_preview_handles_missing_candidates() {
        assert_eq!(response_text_preview(&json!({})), None);
        assert_eq!(response_text_preview(&json!({ "candidates": [] })), None);
    }
}
