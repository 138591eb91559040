//! Vector store access.

mod postgres;

pub use postgres::PgVectorStore;

use crate::types::{Result, SimilarityMatch};
use async_trait::async_trait;

/// The two statement shapes the pipeline issues against a vector store.
///
/// Implementations must be safe for concurrent use by multiple worker tasks.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert one (word, embedding) row; `embedding` is a vector literal.
    async fn insert(&self, word: &str, embedding: &str) -> Result<()>;

    /// Return the `limit` stored rows nearest to `embedding`, ascending by
    /// distance.
    async fn nearest(&self, embedding: &str, limit: i64) -> Result<Vec<SimilarityMatch>>;
}
