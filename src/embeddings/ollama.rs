//! Ollama embeddings API client.

use crate::embeddings::Embedder;
use crate::types::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Embedding request body.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Embedding response body.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

/// Client for an Ollama-style embeddings endpoint.
///
/// One POST per word with a `{model, prompt}` JSON body; the service answers
/// with `{embedding: [...]}`.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// Create a client for `endpoint` using `model`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Embeddings URL (e.g. "http://localhost:11434/api/embeddings")
    /// * `model` - Model identifier sent with every request (e.g. "nomic-embed-text")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OllamaClient {
    async fn fetch(&self, word: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: word,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Embedding {
                word: word.to_string(),
                reason: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PipelineError::Embedding {
                word: word.to_string(),
                reason: format!("service error {}: {}", status, body),
            });
        }

        let parsed: EmbeddingResponse =
            response.json().await.map_err(|e| PipelineError::Embedding {
                word: word.to_string(),
                reason: format!("undecodable response: {}", e),
            })?;

        if parsed.embedding.is_empty() {
            return Err(PipelineError::Embedding {
                word: word.to_string(),
                reason: "service returned an empty embedding".to_string(),
            });
        }

        Ok(parsed.embedding)
    }
}
