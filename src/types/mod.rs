//! Shared types for the embedding pipeline.

mod error;
mod record;

pub use error::{PipelineError, Result};
pub use record::{SimilarityMatch, WordEmbedding};
