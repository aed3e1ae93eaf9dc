use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the DocDigest pipeline.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Provider used to generate abstractive chunk summaries.
    pub summarization_provider: ModelProvider,
    /// Model identifier passed to the summarization provider.
    pub summarization_model: Option<String>,
    /// Provider used to answer questions about a document.
    pub qa_provider: ModelProvider,
    /// Model identifier passed to the question-answering provider.
    pub qa_model: Option<String>,
    /// Base URL of the Ollama runtime shared by both providers.
    pub ollama_url: Option<String>,
    /// Optional override for the chunk size, in characters.
    pub chunk_size: Option<usize>,
    /// Optional override for the number of keywords to extract.
    pub keyword_count: Option<usize>,
    /// Optional override for the minimum summary length, in words.
    pub summary_min_words: Option<usize>,
    /// Optional override for the maximum summary length, in words.
    pub summary_max_words: Option<usize>,
    /// Optional override for the question-answering context budget, in characters.
    pub qa_context_chars: Option<usize>,
}

/// Supported model backends for summarization and question answering.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// No provider configured; deterministic fallbacks apply where available.
    #[default]
    None,
    /// Local Ollama runtime.
    Ollama,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            summarization_provider: load_provider("SUMMARIZATION_PROVIDER")?,
            summarization_model: load_env_optional("SUMMARIZATION_MODEL"),
            qa_provider: load_provider("QA_PROVIDER")?,
            qa_model: load_env_optional("QA_MODEL"),
            ollama_url: load_env_optional("OLLAMA_URL"),
            chunk_size: load_usize_optional("CHUNK_SIZE")?,
            keyword_count: load_usize_optional("KEYWORD_COUNT")?,
            summary_min_words: load_usize_optional("SUMMARY_MIN_WORDS")?,
            summary_max_words: load_usize_optional("SUMMARY_MAX_WORDS")?,
            qa_context_chars: load_usize_optional("QA_CONTEXT_CHARS")?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_usize_optional(key: &str) -> Result<Option<usize>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

fn load_provider(key: &str) -> Result<ModelProvider, ConfigError> {
    match load_env_optional(key) {
        None => Ok(ModelProvider::None),
        Some(value) => value
            .parse()
            .map_err(|()| ConfigError::InvalidValue(key.to_string())),
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        summarization_provider = ?config.summarization_provider,
        qa_provider = ?config.qa_provider,
        chunk_size = ?config.chunk_size,
        keyword_count = ?config.keyword_count,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
