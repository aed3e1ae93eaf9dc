use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing digest activity.
#[derive(Default)]
pub struct DigestMetrics {
    documents_digested: AtomicU64,
    chunks_summarized: AtomicU64,
    extractive_fallbacks: AtomicU64,
    questions_answered: AtomicU64,
}

impl DigestMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a digested document, the number of chunks it produced, and how
    /// many of those chunks were summarized by the extractive fallback.
    pub fn record_document(&self, chunk_count: u64, fallback_chunks: u64) {
        self.documents_digested.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized
            .fetch_add(chunk_count, Ordering::Relaxed);
        self.extractive_fallbacks
            .fetch_add(fallback_chunks, Ordering::Relaxed);
    }

    /// Record a successfully answered question.
    pub fn record_question(&self) {
        self.questions_answered.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_digested: self.documents_digested.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            extractive_fallbacks: self.extractive_fallbacks.load(Ordering::Relaxed),
            questions_answered: self.questions_answered.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of digest counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents that have been digested since startup.
    pub documents_digested: u64,
    /// Total chunk count summarized across all digested documents.
    pub chunks_summarized: u64,
    /// Chunks that fell back to the deterministic extractive summary.
    pub extractive_fallbacks: u64,
    /// Questions answered successfully by the QA provider.
    pub questions_answered: u64,
}
