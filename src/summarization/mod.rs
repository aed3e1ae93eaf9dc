//! Abstractions for generating abstractive chunk summaries via local providers.
//!
//! The summarization provider is optional; when none is configured the
//! processing layer falls back to deterministic extractive summaries. The
//! Ollama-backed client issues HTTP requests directly to the runtime and is
//! constructed once at service build time, then reused for every chunk.

use crate::config::{ModelProvider, get_config};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider was explicitly disabled or unreachable.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Chunk of document text to summarize.
    pub text: String,
    /// Minimum summary length requested, in words.
    pub min_words: usize,
    /// Maximum summary length requested, in words.
    pub max_words: usize,
}

/// Interface implemented by abstractive summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a bounded summary of one chunk of text.
    async fn summarize_chunk(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Build a summarization client based on configuration.
///
/// Returns `None` when no provider is configured or the provider is missing
/// its model identifier; callers treat `None` as "use the extractive fallback".
pub fn get_summarization_client() -> Option<Box<dyn SummarizationClient + Send + Sync>> {
    let config = get_config();
    match config.summarization_provider {
        ModelProvider::None => None,
        ModelProvider::Ollama => {
            let Some(model) = config.summarization_model.clone() else {
                tracing::warn!(
                    "SUMMARIZATION_MODEL not set; chunk summaries fall back to extractive"
                );
                return None;
            };
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Some(Box::new(OllamaSummarizationClient::new(base_url, model)))
        }
    }
}

struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    fn new(base_url: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("docdigest/summary")
            .build()
            .expect("Failed to construct reqwest::Client for summarization");
        Self {
            http,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn build_summary_prompt(text: &str, min_words: usize, max_words: usize) -> String {
    format!(
        "System: You summarize document passages faithfully and concisely. \
         Return a single paragraph of between {min_words} and {max_words} words. \
         Do not add commentary or headings.\n\nPassage:\n{text}\n\nSummary:"
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn summarize_chunk(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_summary_prompt(&request.text, request.min_words, request.max_words),
            "stream": false,
            "options": {
                // Lower temperature for deterministic summaries.
                "temperature": 0.1,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_client(base_url: String) -> OllamaSummarizationClient {
        OllamaSummarizationClient {
            http: Client::builder()
                .user_agent("docdigest-test")
                .build()
                .expect("client"),
            base_url,
            model: "llama".into(),
        }
    }

    #[tokio::test]
    async fn ollama_client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({
                    "response": "Summary text",
                    "done": true
                }));
            })
            .await;

        let summary = client
            .summarize_chunk(SummarizationRequest {
                text: "A passage to summarize.".into(),
                min_words: 50,
                max_words: 150,
            })
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn ollama_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("boom");
            })
            .await;

        let error = client
            .summarize_chunk(SummarizationRequest {
                text: "A passage.".into(),
                min_words: 50,
                max_words: 150,
            })
            .await
            .expect_err("error response");

        assert!(
            matches!(error, SummarizationClientError::GenerationFailed(message) if message.contains("500"))
        );
    }

    #[tokio::test]
    async fn ollama_client_rejects_incomplete_stream() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({
                    "response": "partial",
                    "done": false
                }));
            })
            .await;

        let error = client
            .summarize_chunk(SummarizationRequest {
                text: "A passage.".into(),
                min_words: 50,
                max_words: 150,
            })
            .await
            .expect_err("incomplete response");

        assert!(matches!(error, SummarizationClientError::InvalidResponse(_)));
    }

    #[test]
    fn prompt_carries_word_bounds() {
        let prompt = build_summary_prompt("text", 50, 150);
        assert!(prompt.contains("between 50 and 150 words"));
        assert!(prompt.contains("text"));
    }
}
