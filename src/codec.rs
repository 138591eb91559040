//! Textual vector literal encoding.
//!
//! The store consumes and produces vectors as `[v0,v1,...,vn-1]` literals.
//! Round-tripping preserves element count; component formatting may lose
//! floating-point precision.

use crate::types::{PipelineError, Result};

/// Encode an embedding as a vector literal.
///
/// An empty embedding encodes as `[]`.
pub fn encode(embedding: &[f32]) -> String {
    let mut literal = String::with_capacity(embedding.len() * 10 + 2);
    literal.push('[');
    for (i, component) in embedding.iter().enumerate() {
        if i > 0 {
            literal.push(',');
        }
        literal.push_str(&component.to_string());
    }
    literal.push(']');
    literal
}

/// Decode a vector literal back into an embedding.
///
/// Surrounding bracket and quote characters are stripped and whitespace
/// around components is tolerated.
///
/// # Errors
///
/// Returns `PipelineError::Parse` if any component is not a valid number.
pub fn decode(literal: &str) -> Result<Vec<f32>> {
    let inner = literal
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '\'' | '"'));
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|token| {
            token.trim().parse::<f32>().map_err(|e| {
                PipelineError::Parse(format!("bad vector component '{}': {}", token.trim(), e))
            })
        })
        .collect()
}
