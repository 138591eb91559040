//! Error types for the embedding pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The embedding service call failed or returned no usable vector for
    /// one word. Recovered locally: the word is dropped from the result set.
    #[error("embedding request for '{word}' failed: {reason}")]
    Embedding { word: String, reason: String },

    #[error("invalid vector literal: {0}")]
    Parse(String),

    #[error("source error: {0}")]
    Source(String),

    /// A single insert failed during bulk loading. Logged by the worker,
    /// never surfaced as the loader's return error.
    #[error("insert for '{word}' failed: {reason}")]
    Insert { word: String, reason: String },

    #[error("query error: {0}")]
    Query(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
