/// Gemini client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the generative-language API
/// directly. All upstream interactions MUST go through this module.
///
/// Model: gemini-1.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all upstream calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("GEMINI_API_KEY is not configured")]
    MissingKey,
}

/// Outbound `generateContent` request body.
///
/// `contents` stays raw JSON: the chat endpoint forwards caller-supplied
/// turns verbatim, and modeling them would silently drop fields this
/// gateway does not know about (inline media parts, future roles).
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Value,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// Generation parameters, serialized with the exact field names the
/// upstream expects: camelCase sampling knobs, snake_case structured-output
/// pair. Unset fields are omitted from the wire body entirely.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    // f64 so constants like 0.7 hit the wire as written, not as the
    // nearest f32 widened back out.
    pub temperature: f64,
    #[serde(rename = "topK", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// The upstream transport seam. `AppState` carries this as
/// `Arc<dyn UpstreamClient>` so tests can swap in a canned upstream without
/// touching the handlers or the gateway operations.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<Value, GeminiError>;
}

/// The real Gemini client used in production.
///
/// Deliberately minimal: no retries, no backoff, no client-side timeout.
/// Every failure is terminal for the request that caused it.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl UpstreamClient for GeminiClient {
    /// The forwarding primitive shared by all three endpoints: attach the
    /// key, issue one POST, classify the outcome.
    ///
    /// The key travels only in the `key` query parameter and must never be
    /// logged; log lines carry the path without the query string.
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<Value, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingKey)?;

        let url = format!("{API_BASE_URL}/models/{MODEL}:generateContent");
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let payload: Value = serde_json::from_str(&text)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_serializes_sampling_knobs_with_upstream_names() {
        let config = GenerationConfig {
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: 8192,
            response_mime_type: None,
            response_schema: None,
        };

        let wire = serde_json::to_value(&config).unwrap();
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
    fn config_keeps_structured_output_pair_snake_case() {
        let schema = json!({ "type": "object", "properties": { "title": { "type": "string" } } });
        let config = GenerationConfig {
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: 8192,
            response_mime_type: Some("application/json"),
            response_schema: Some(schema.clone()),
        };

        let wire = serde_json::to_value(&config).unwrap();
        assert_eq!(wire["response_mime_type"], "application/json");
        assert_eq!(wire["response_schema"], schema);
    }

    #[test]
    fn config_omits_unset_fields_entirely() {
        let config = GenerationConfig {
            temperature: 0.5,
            top_k: None,
            top_p: None,
            max_output_tokens: 2048,
            response_mime_type: None,
            response_schema: None,
        };

        let wire = serde_json::to_value(&config).unwrap();
        assert_eq!(
            wire,
            json!({ "temperature": 0.5, "maxOutputTokens": 2048 })
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let client = GeminiClient::new(None);
        let request = GenerateContentRequest {
            contents: json!([{ "parts": [{ "text": "hello" }] }]),
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: Some(40),
                top_p: Some(0.95),
                max_output_tokens: 2048,
                response_mime_type: None,
                response_schema: None,
            },
        };

        let err = client.generate_content(&request).await.unwrap_err();
        assert!(matches!(err, GeminiError::MissingKey));
    }
}
