//! HTTP client for the Gemini `generateContent` REST endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::prompt::GenerationRequest;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A hosted generative-text service.
///
/// `Ok(None)` means the service answered well-formed but produced no usable
/// text.
pub trait GenerativeTextService {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Option<String>, AdvisorError>> + Send;
}

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
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

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, AdvisorError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("efarmer/0.1 (advisory-proxy)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }
}

impl GenerativeTextService for GeminiClient {
    /// Sends one `generateContent` call. No retries.
    ///
    /// # Errors
    ///
    /// - [`AdvisorError::Http`] on network failure or timeout.
    /// - [`AdvisorError::Status`] on a non-2xx status.
    /// - [`AdvisorError::Deserialize`] if the body is not the expected shape.
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AdvisorError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AdvisorError::Status { status, body: text });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        Ok(parsed.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<GenerateContentResponse>(json)
            .expect("valid response json")
            .into_text()
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = GeminiClient::with_base_url("k", 30, "http://localhost:9999/v1beta/")
            .expect("client construction should not fail");
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let json = r#"{"candidates":[
            {"content":{"parts":[{"text":"Plant "},{"text":"after the first rains."}]}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        assert_eq!(parse(json).as_deref(), Some("Plant after the first rains."));
    }

    #[test]
    fn no_candidates_is_none() {
        assert_eq!(parse(r#"{"candidates":[]}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn candidate_without_content_is_none() {
        assert_eq!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#), None);
    }

    #[test]
    fn whitespace_only_text_is_none() {
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[{"text":"  \n"}]}}]}"#),
            None
        );
    }

    #[test]
    fn request_serializes_in_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "q" }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            },
            generation_config: GenerationConfig { temperature: 0.6 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(json["systemInstruction"].get("role").is_none());
        assert!(json["generationConfig"]["temperature"].is_number());
    }
}
