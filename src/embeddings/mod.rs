//! Embedding generation against a model-serving endpoint.
//!
//! `OllamaClient` performs the per-word HTTP calls and `EmbeddingGenerator`
//! drives a bounded pool of them over a full word list.

mod generator;
mod ollama;

pub use generator::{EmbeddingGenerator, GenerationSummary, ProgressObserver};
pub use ollama::OllamaClient;

use crate::types::Result;
use async_trait::async_trait;

/// A provider that can produce an embedding vector for a single word.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Fetch the embedding for one word.
    ///
    /// Implementations must not retry internally; retry policy belongs to
    /// the caller.
    async fn fetch(&self, word: &str) -> Result<Vec<f32>>;
}
