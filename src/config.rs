//! Runtime configuration from environment variables.

use crate::types::{PipelineError, Result};

/// Default embeddings endpoint (local Ollama).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/embeddings";
/// Default embedding model.
pub const DEFAULT_MODEL: &str = "nomic-embed-text";
/// Default in-flight request limit for generation.
pub const DEFAULT_CONCURRENCY: usize = 50;
/// Default insert worker count for loading.
pub const DEFAULT_WORKERS: usize = 4;

/// Pipeline configuration.
///
/// Every field can be overridden by an environment variable:
/// `LEXIVEC_ENDPOINT`, `LEXIVEC_MODEL`, `DATABASE_URL`,
/// `LEXIVEC_CONCURRENCY`, `LEXIVEC_WORKERS`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embeddings endpoint URL.
    pub endpoint: String,
    /// Embedding model identifier.
    pub model: String,
    /// Postgres connection string.
    pub database_url: String,
    /// In-flight request limit for generation.
    pub concurrency: usize,
    /// Insert worker count for loading.
    pub workers: usize,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: std::env::var("LEXIVEC_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: std::env::var("LEXIVEC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/lexivec".to_string()),
            concurrency: parse_env("LEXIVEC_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            workers: parse_env("LEXIVEC_WORKERS", DEFAULT_WORKERS)?,
        })
    }
}

fn parse_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|_| {
            PipelineError::Config(format!("{} must be an integer, got '{}'", key, value))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_setup() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.workers, DEFAULT_WORKERS);
    }

    #[test]
    fn bad_integer_is_a_config_error() {
        std::env::set_var("LEXIVEC_TEST_BAD_INT", "not-a-number");
        let err = parse_env("LEXIVEC_TEST_BAD_INT", 1).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        std::env::remove_var("LEXIVEC_TEST_BAD_INT");
    }
}
