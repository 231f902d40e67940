//! Gemini REST client
//!
//! Calls `models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header and joins the text parts of the first
//! candidate.

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::generator::{prompt_for, DescriptionGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

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

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any
    pub(crate) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Description generator backed by the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    config: AssistConfig,
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Build a generator; a missing key only fails at generation time
    #[must_use]
    pub fn new(config: AssistConfig) -> Self {
        if !config.has_api_key() {
            tracing::warn!("API key is missing, AI features will not work");
        }
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiGenerator {
    async fn generate(&self, title: &str) -> Result<String, AssistError> {
        let key = self.config.api_key.as_deref().ok_or(AssistError::MissingApiKey)?;
        let prompt = prompt_for(title);
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        tracing::debug!(model = %self.config.model, "requesting task description");
        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(AssistError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> GenerateResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let body = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"Gather volunteers. "},{"text":"Pack boxes."}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        );
        assert_eq!(body.text().as_deref(), Some("Gather volunteers. Pack boxes."));
    }

    #[test]
    fn blocked_or_empty_answers_have_no_text() {
        assert_eq!(parse(r#"{"candidates":[]}"#).text(), None);
        assert_eq!(parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).text(), None);
        assert_eq!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).text(), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{"parts":[{"text":" "}]}}]}"#).text(), None);
    }

    #[test]
    fn request_shape() {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn url_includes_model() {
        let generator = GeminiGenerator::new(
            AssistConfig::new()
                .with_api_key("k")
                .with_endpoint("http://localhost:9000/"),
        );
        assert_eq!(
            generator.url(),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let generator = GeminiGenerator::new(AssistConfig::new());
        let err = generator.generate("anything").await.unwrap_err();
        assert!(matches!(err, AssistError::MissingApiKey));
    }
}
