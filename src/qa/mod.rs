//! Abstractions for answering questions about a document via local providers.
//!
//! Mirrors the summarization adapter: an object-safe capability trait with an
//! Ollama-backed implementation. The provider answers from a fixed context
//! window the pipeline truncates beforehand; it never sees the full document.

use crate::config::{ModelProvider, get_config};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while attempting question answering.
#[derive(Debug, Error)]
pub enum QaClientError {
    /// Provider was explicitly disabled or unreachable.
    #[error("Question-answering provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate answer: {0}")]
    AnswerFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Request payload passed to the question-answering provider.
#[derive(Debug, Clone)]
pub struct QaRequest {
    /// Question posed by the user.
    pub question: String,
    /// Document context the answer must be grounded in.
    pub context: String,
}

/// Interface implemented by question-answering providers.
#[async_trait]
pub trait QaClient: Send + Sync {
    /// Answer a question using only the supplied context.
    async fn answer(&self, request: QaRequest) -> Result<String, QaClientError>;
}

/// Build a question-answering client based on configuration.
///
/// Returns `None` when no provider is configured or the provider is missing
/// its model identifier; callers surface that as a non-fatal condition.
pub fn get_qa_client() -> Option<Box<dyn QaClient + Send + Sync>> {
    let config = get_config();
    match config.qa_provider {
        ModelProvider::None => None,
        ModelProvider::Ollama => {
            let Some(model) = config.qa_model.clone() else {
                tracing::warn!("QA_MODEL not set; question answering disabled");
                return None;
            };
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Some(Box::new(OllamaQaClient::new(base_url, model)))
        }
    }
}

struct OllamaQaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaQaClient {
    fn new(base_url: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("docdigest/qa")
            .build()
            .expect("Failed to construct reqwest::Client for question answering");
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

fn build_qa_prompt(question: &str, context: &str) -> String {
    format!(
        "System: Answer the question using only the provided context. Quote the \
         relevant span where possible. If the context does not contain the \
         answer, say so plainly.\n\nContext:\n{context}\n\nQuestion: {question}\nAnswer:"
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl QaClient for OllamaQaClient {
    async fn answer(&self, request: QaRequest) -> Result<String, QaClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_qa_prompt(&request.question, &request.context),
            "stream": false,
            "options": {
                // Extractive answers want the least creative decoding.
                "temperature": 0.0,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                QaClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(QaClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QaClientError::AnswerFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            QaClientError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(QaClientError::InvalidResponse(
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

    fn test_client(base_url: String) -> OllamaQaClient {
        OllamaQaClient {
            http: Client::builder()
                .user_agent("docdigest-test")
                .build()
                .expect("client"),
            base_url,
            model: "llama".into(),
        }
    }

    #[tokio::test]
    async fn ollama_client_returns_trimmed_answer() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({
                    "response": "  The answer.  ",
                    "done": true
                }));
            })
            .await;

        let answer = client
            .answer(QaRequest {
                question: "What is it?".into(),
                context: "It is the answer.".into(),
            })
            .await
            .expect("answer");

        mock.assert();
        assert_eq!(answer, "The answer.");
    }

    #[tokio::test]
    async fn ollama_client_maps_error_status() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(503).body("unavailable");
            })
            .await;

        let error = client
            .answer(QaRequest {
                question: "What is it?".into(),
                context: "Context.".into(),
            })
            .await
            .expect_err("error response");

        assert!(matches!(error, QaClientError::AnswerFailed(message) if message.contains("503")));
    }

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = build_qa_prompt("Why?", "Because.");
        assert!(prompt.contains("Question: Why?"));
        assert!(prompt.contains("Context:\nBecause."));
    }
}
