//! Lexivec - concurrent word embedding pipeline with pgvector similarity search.
//!
//! Three stages: bounded-concurrency embedding generation against a
//! model-serving endpoint, bounded worker-pool bulk loading into a
//! Postgres/pgvector table, and nearest-neighbor retrieval by vector
//! distance.

pub mod codec;
pub mod config;
pub mod embeddings;
pub mod loader;
pub mod query;
pub mod source;
pub mod store;
pub mod types;

// Re-export main types
pub use config::Config;
pub use embeddings::{Embedder, EmbeddingGenerator, GenerationSummary, OllamaClient};
pub use loader::{BulkLoader, LoadSummary};
pub use query::SimilarityQuery;
pub use store::{PgVectorStore, VectorStore};
pub use types::{PipelineError, Result, SimilarityMatch, WordEmbedding};
