//! Client for the Gemini `generateContent` endpoint.
//!
//! Only the first candidate is ever read. Providers have shipped a few
//! different shapes for it, so the text is probed rather than deserialized
//! into a fixed struct.

use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::RecommendationError;
use crate::infrastructure::config::GeminiConfig;

/// Where recommendation text may sit inside `candidates[0]`, in probe order
const TEXT_POINTERS: [&str; 4] = [
    "/content/parts/0/text",
    "/content/0/parts/0/text",
    "/output",
    "/text",
];

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        Self {
            http: reqwest::Client::new(),
            url,
            api_key: config.api_key.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one prompt and return the first candidate's text
    pub async fn generate(&self, prompt: &str) -> Result<String, RecommendationError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-goog-api-key", key);
        }

        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(RecommendationError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Gemini returned a non-JSON success body: {}", e);
            RecommendationError::NoRecommendation
        })?;

        extract_text(&parsed).ok_or(RecommendationError::NoRecommendation)
    }
}

fn transport_error(e: reqwest::Error) -> RecommendationError {
    RecommendationError::Transport(e.to_string())
}

/// First non-blank recommendation text of `candidates[0]`
pub fn extract_text(response: &Value) -> Option<String> {
    let candidate = response.get("candidates")?.as_array()?.first()?;

    TEXT_POINTERS.iter().find_map(|pointer| {
        candidate
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}

/// `error.message` of a failure body, when there is one
pub fn error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
