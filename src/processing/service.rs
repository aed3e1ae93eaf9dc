//! Digest service coordinating chunking, summarization, and question answering.

use crate::{
    config::get_config,
    metrics::{DigestMetrics, MetricsSnapshot},
    processing::{
        chunking::{char_prefix, chunk_text},
        extractive::extractive_summary,
        keywords::extract_keywords,
        types::{DigestOutcome, DigestSettings, QaError, QaOutcome},
    },
    qa::{QaClient, QaRequest, get_qa_client},
    summarization::{SummarizationClient, SummarizationRequest, get_summarization_client},
};
use std::sync::Arc;

/// Coordinates the full digest pipeline: chunking, per-chunk summarization,
/// keyword extraction, and optional question answering.
///
/// The service owns long-lived handles to the provider clients and the
/// metrics registry so every document reuses the same components. Construct
/// it once near process start and share it through an `Arc`.
pub struct DigestService {
    settings: DigestSettings,
    summarizer: Option<Box<dyn SummarizationClient + Send + Sync>>,
    qa: Option<Box<dyn QaClient + Send + Sync>>,
    metrics: Arc<DigestMetrics>,
}

impl DigestService {
    /// Build a new digest service from loaded configuration.
    pub fn new() -> Self {
        let config = get_config();
        let settings = DigestSettings::from_config(config);
        tracing::info!(
            chunk_size = settings.chunk_size,
            keyword_count = settings.keyword_count,
            "Initializing digest service"
        );
        Self::with_clients(settings, get_summarization_client(), get_qa_client())
    }

    /// Build a digest service with explicit provider clients.
    ///
    /// This is the seam for embedders and tests: pass `None` for either
    /// capability to run without it.
    pub fn with_clients(
        settings: DigestSettings,
        summarizer: Option<Box<dyn SummarizationClient + Send + Sync>>,
        qa: Option<Box<dyn QaClient + Send + Sync>>,
    ) -> Self {
        Self {
            settings,
            summarizer,
            qa,
            metrics: Arc::new(DigestMetrics::new()),
        }
    }

    /// Chunk a document, summarize every chunk, and extract keywords.
    ///
    /// Provider failures degrade to the deterministic extractive fallback per
    /// chunk, so the digest itself never fails. Empty input yields an empty
    /// outcome.
    pub async fn digest(&self, text: &str) -> DigestOutcome {
        let chunk_size = self.settings.chunk_size;
        let chunks = chunk_text(text, chunk_size);
        tracing::info!(chunks = chunks.len(), chunk_size, "Processing document");

        let mut chunk_summaries = Vec::with_capacity(chunks.len());
        let mut fallback_chunks = 0usize;
        for (index, chunk) in chunks.iter().enumerate() {
            let (summary, fell_back) = self.summarize_chunk(index, chunk).await;
            if fell_back {
                fallback_chunks += 1;
            }
            chunk_summaries.push(summary);
        }

        let summary = chunk_summaries.join(" ").trim().to_string();
        let keywords = extract_keywords(text, self.settings.keyword_count);

        self.metrics
            .record_document(chunks.len() as u64, fallback_chunks as u64);
        tracing::info!(
            chunks = chunks.len(),
            fallback_chunks,
            keywords = keywords.len(),
            "Document digested"
        );

        DigestOutcome {
            chunk_count: chunks.len(),
            chunk_size,
            chunk_summaries,
            summary,
            keywords,
            fallback_chunks,
        }
    }

    /// Answer a question about a document using the configured QA provider.
    ///
    /// The provider sees at most `qa_context_chars` characters of the
    /// document prefix. Errors are returned to the caller, which renders
    /// them as non-fatal messages.
    pub async fn answer_question(
        &self,
        question: &str,
        text: &str,
    ) -> Result<QaOutcome, QaError> {
        let client = self.qa.as_ref().ok_or(QaError::ProviderNotConfigured)?;

        let context = char_prefix(text, self.settings.qa_context_chars);
        let truncated = context.len() < text.len();
        let context_chars = context.chars().count();
        tracing::debug!(context_chars, truncated, "Answering question");

        let answer = client
            .answer(QaRequest {
                question: question.to_string(),
                context: context.to_string(),
            })
            .await?;

        self.metrics.record_question();
        Ok(QaOutcome {
            answer,
            context_chars,
            truncated,
        })
    }

    /// Return the current digest metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    async fn summarize_chunk(&self, index: usize, chunk: &str) -> (String, bool) {
        if let Some(client) = &self.summarizer {
            let request = SummarizationRequest {
                text: chunk.to_string(),
                min_words: self.settings.summary_min_words,
                max_words: self.settings.summary_max_words,
            };
            match client.summarize_chunk(request).await {
                Ok(summary) => return (summary, false),
                Err(error) => {
                    tracing::warn!(
                        chunk = index,
                        error = %error,
                        "Abstractive summarization failed; falling back to extractive"
                    );
                }
            }
        }
        (
            extractive_summary(chunk, self.settings.summary_max_words),
            true,
        )
    }
}
