//! Text-generation client seam and the Gemini implementation.

use async_trait::async_trait;

/// Failure from a generation call.
///
/// The service exposes no structured error code we can rely on, so the retry
/// layer classifies failures by inspecting this message. HTTP failures keep
/// the status code and response body in the message for that reason.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct GenerateError {
    pub message: String,
}

impl GenerateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Seam for the external generation service, so the report pipeline can be
/// exercised against a mock.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Client for the Google Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerateError::new(format!("generation request failed: {err}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GenerateError::new(format!("generation response unreadable: {err}")))?;

        if !status.is_success() {
            return Err(GenerateError::new(format!(
                "generation request returned status {status}: {text}"
            )));
        }

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|err| GenerateError::new(format!("generation response not JSON: {err}")))?;
        let generated = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| GenerateError::new("generation response carried no text"))?;

        Ok(generated.to_string())
    }
}
