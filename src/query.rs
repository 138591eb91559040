//! Nearest-neighbor retrieval.

use crate::codec;
use crate::store::VectorStore;
use crate::types::{Result, SimilarityMatch};
use std::sync::Arc;

/// Issues nearest-neighbor queries against a vector store.
pub struct SimilarityQuery {
    store: Arc<dyn VectorStore>,
}

impl SimilarityQuery {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Return up to `limit` stored words nearest to `query`, nearest first.
    ///
    /// A zero or negative `limit` is a well-formed request for nothing: it
    /// returns an empty vector without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Query` if the store call fails or a result row
    /// cannot be decoded. Unlike the loader's per-record tolerance, a bad row
    /// fails the whole call.
    pub async fn nearest(&self, query: &[f32], limit: i64) -> Result<Vec<SimilarityMatch>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        self.store.nearest(&codec::encode(query), limit).await
    }
}
