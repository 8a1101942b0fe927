//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `generateContent` with optional inline image data and an optional
//! JSON response schema. The API key comes from [`SecretService`].

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use rigforge_core::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiSettings};
use rigforge_core::gateway::GatewayError;
use rigforge_core::secret::SecretService;

/// A single `generateContent` call.
#[derive(Debug, Clone, Default)]
pub struct GeminiPrompt {
    pub text: String,
    /// Base64 payload and its MIME type.
    pub inline_data: Option<(String, String)>,
    /// When set, the model is asked for `application/json` matching this schema.
    pub response_schema: Option<Value>,
}

impl GeminiPrompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_inline_data(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.inline_data = Some((mime_type.into(), data.into()));
        self
    }
}

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Builds an agent from the stored secret and `config.toml` settings.
    pub async fn try_from_secrets(
        secrets: &dyn SecretService,
        settings: &GeminiSettings,
    ) -> Result<Self, GatewayError> {
        let secret_config = secrets
            .load_secrets()
            .await
            .map_err(|e| GatewayError::NotConfigured(format!("Failed to load secrets: {e}")))?;

        let api_key = secret_config
            .gemini
            .map(|g| g.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::NotConfigured(
                    "set GEMINI_API_KEY or add a key to secret.json".to_string(),
                )
            })?;

        let model = if settings.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            settings.model.clone()
        };

        Ok(Self::new(api_key, model).with_base_url(settings.base_url.clone()))
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one prompt and returns the first text part of the answer.
    pub async fn generate(&self, prompt: GeminiPrompt) -> Result<String, GatewayError> {
        let request = self.build_request(prompt)?;
        self.send_request(&request).await
    }

    fn build_request(&self, prompt: GeminiPrompt) -> Result<GenerateContentRequest, GatewayError> {
        let mut parts = Vec::new();
        if let Some((mime_type, data)) = prompt.inline_data {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload { mime_type, data },
            });
        }
        if !prompt.text.trim().is_empty() {
            parts.push(Part::Text { text: prompt.text });
        }

        if parts.is_empty() {
            return Err(GatewayError::Transport(
                "Gemini payload must include text or inline data".into(),
            ));
        }

        let generation_config = prompt.response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });

        Ok(GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config,
        })
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );
        debug!(model = %self.model, "sending Gemini request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::malformed(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(GatewayError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GatewayError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape_with_schema_and_image() {
        let agent = GeminiApiAgent::new("key", "gemini-2.5-flash");
        let prompt = GeminiPrompt::text("What is this?")
            .with_inline_data("image/jpeg", "AAAA")
            .with_schema(json!({"type": "OBJECT"}));

        let request = agent.build_request(prompt).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(value["contents"][0]["parts"][1]["text"], "What is this?");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_plain_text_request_has_no_generation_config() {
        let agent = GeminiApiAgent::new("key", "m");
        let value = serde_json::to_value(agent.build_request(GeminiPrompt::text("hi")).unwrap())
            .unwrap();
        assert!(value.get("generationConfig").is_none());
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let agent = GeminiApiAgent::new("key", "m");
        assert!(agent.build_request(GeminiPrompt::text("  ")).is_err());
    }

    #[test]
    fn test_extract_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"ok\":true}"}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "{\"ok\":true}");

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(
            extract_text_response(empty).unwrap_err(),
            GatewayError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_reads_error_body() {
        let body = r#"{"error":{"code":429,"message":"quota","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err,
            GatewayError::Http {
                status: 429,
                message: "RESOURCE_EXHAUSTED: quota".to_string()
            }
        );
        assert!(err.is_retryable());

        let raw = map_http_error(StatusCode::BAD_REQUEST, "nope".to_string());
        assert!(matches!(raw, GatewayError::Http { status: 400, ref message } if message == "nope"));
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let agent = GeminiApiAgent::new("k", "m").with_base_url("http://localhost:8080/");
        assert_eq!(agent.base_url, "http://localhost:8080");
    }
}
