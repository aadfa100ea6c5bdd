//! Google Gemini `generateContent` client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Content, LlmClient, Tool};

pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: &'a [Content],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [Tool],
}

fn no_tools(tools: &&[Tool]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{method}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn map_api_error(status: u16, response_text: &str) -> reptrack_shared::Error {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        reptrack_shared::Error::Upstream(format!("Gemini API error ({status}): {message}"))
    }

    fn first_content(response: GeminiResponse) -> reptrack_shared::Result<Content> {
        if let Some(error) = response.error {
            reptrack_shared::upstream!("Gemini API error: {}", error.message);
        }

        let Some(candidate) = response.candidates.and_then(|c| c.into_iter().next()) else {
            reptrack_shared::upstream!("No candidate in Gemini response");
        };

        match candidate.content {
            Some(content) => Ok(content),
            None => reptrack_shared::upstream!(
                "No content in Gemini response (finish reason: {})",
                candidate.finish_reason.unwrap_or_default()
            ),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(
        &self,
        contents: &[Content],
        tools: &[Tool],
    ) -> reptrack_shared::Result<Content> {
        if self.config.api_key.is_empty() {
            reptrack_shared::upstream!("Gemini API key is not configured");
        }

        tracing::debug!(turns = contents.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url("generateContent"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&GeminiRequest { contents, tools })
            .send()
            .await
            .map_err(|e| {
                reptrack_shared::Error::Upstream(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            reptrack_shared::Error::Upstream(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            tracing::error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(error = %e, "Failed to parse response");
                reptrack_shared::Error::Upstream(format!("Failed to parse Gemini response: {e}"))
            })?;

        Self::first_content(gemini_response)
    }
}
