//! Document processing pipeline: chunking, keyword extraction, and summary orchestration.

pub mod chunking;
mod extractive;
pub mod keywords;
mod service;
pub mod types;

pub use chunking::chunk_text;
pub use keywords::extract_keywords;
pub use service::DigestService;
pub use types::{DigestOutcome, DigestSettings, QaError, QaOutcome};
