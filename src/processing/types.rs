//! Core data types and error definitions for the processing pipeline.

use crate::config::Config;
use crate::processing::chunking::{DEFAULT_CHUNK_SIZE, determine_chunk_size};
use crate::processing::keywords::DEFAULT_KEYWORD_COUNT;
use crate::qa::QaClientError;
use thiserror::Error;

/// Default minimum summary length, in words.
pub const DEFAULT_SUMMARY_MIN_WORDS: usize = 50;
/// Default maximum summary length, in words.
pub const DEFAULT_SUMMARY_MAX_WORDS: usize = 150;
/// Default question-answering context budget, in characters.
pub const DEFAULT_QA_CONTEXT_CHARS: usize = 4000;

/// Resolved knobs governing one digest pipeline instance.
///
/// Built once from [`Config`] at service construction; tests construct it
/// directly to stay independent of process environment.
#[derive(Debug, Clone, Copy)]
pub struct DigestSettings {
    /// Chunk size in characters handed to the chunker.
    pub chunk_size: usize,
    /// Number of keywords requested from the extractor.
    pub keyword_count: usize,
    /// Minimum summary length, in words, requested from the provider.
    pub summary_min_words: usize,
    /// Maximum summary length, in words; also bounds the extractive fallback.
    pub summary_max_words: usize,
    /// Character budget for the question-answering context prefix.
    pub qa_context_chars: usize,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            keyword_count: DEFAULT_KEYWORD_COUNT,
            summary_min_words: DEFAULT_SUMMARY_MIN_WORDS,
            summary_max_words: DEFAULT_SUMMARY_MAX_WORDS,
            qa_context_chars: DEFAULT_QA_CONTEXT_CHARS,
        }
    }
}

impl DigestSettings {
    /// Resolve settings from loaded configuration, applying defaults and clamps.
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunk_size: determine_chunk_size(config.chunk_size),
            keyword_count: config.keyword_count.unwrap_or(DEFAULT_KEYWORD_COUNT),
            summary_min_words: config.summary_min_words.unwrap_or(DEFAULT_SUMMARY_MIN_WORDS),
            summary_max_words: config.summary_max_words.unwrap_or(DEFAULT_SUMMARY_MAX_WORDS),
            qa_context_chars: config
                .qa_context_chars
                .unwrap_or(DEFAULT_QA_CONTEXT_CHARS)
                .max(1),
        }
    }
}

/// Result of digesting one document, produced by
/// [`crate::processing::DigestService::digest`].
#[derive(Debug, Clone)]
pub struct DigestOutcome {
    /// Number of chunks produced for the document.
    pub chunk_count: usize,
    /// Chunk size used during processing.
    pub chunk_size: usize,
    /// Per-chunk summaries, in document order.
    pub chunk_summaries: Vec<String>,
    /// Combined summary: chunk summaries joined by single spaces, trimmed.
    pub summary: String,
    /// Ranked keywords extracted from the full document text.
    pub keywords: Vec<String>,
    /// Chunks summarized by the extractive fallback instead of the provider.
    pub fallback_chunks: usize,
}

/// Result of answering one question, produced by
/// [`crate::processing::DigestService::answer_question`].
#[derive(Debug, Clone)]
pub struct QaOutcome {
    /// Answer text returned by the provider.
    pub answer: String,
    /// Number of characters of context handed to the provider.
    pub context_chars: usize,
    /// Whether the document was truncated to fit the context budget.
    pub truncated: bool,
}

/// Errors emitted while answering a question.
///
/// These are surfaced to the user as non-fatal messages; a failed question
/// never aborts the surrounding digest.
#[derive(Debug, Error)]
pub enum QaError {
    /// No question-answering provider is configured.
    #[error("No question-answering provider configured")]
    ProviderNotConfigured,
    /// The provider failed to produce an answer.
    #[error("Failed to answer question: {0}")]
    Client(#[from] QaClientError),
}
