#![deny(missing_docs)]

//! Core library for the DocDigest summarization pipeline.

/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Digest metrics helpers.
pub mod metrics;
/// Document processing pipeline utilities.
pub mod processing;
/// Question-answering client abstraction and adapters.
pub mod qa;
/// Summarization client abstraction and adapters.
pub mod summarization;
