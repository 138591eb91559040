//! Pipeline record types.

use serde::{Deserialize, Serialize};

/// A word paired with its embedding vector.
///
/// Serialized one object per line (JSONL) as the durable hand-off between
/// embedding generation and bulk loading. The `word`/`embedding` field names
/// are a stable interop contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEmbedding {
    pub word: String,
    pub embedding: Vec<f32>,
}

impl WordEmbedding {
    pub fn new(word: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            word: word.into(),
            embedding,
        }
    }
}

/// One row returned by a nearest-neighbor query.
///
/// `distance` is non-negative; smaller means more similar.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    /// Store-assigned row identifier.
    pub id: i64,
    pub word: String,
    pub distance: f32,
}
