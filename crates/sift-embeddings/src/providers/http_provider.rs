//! HTTP provider for the external embedding service.
//!
//! Speaks the common `/embeddings` JSON shape: `{model, input: [...]}` in,
//! `{data: [{index, embedding}]}` out. Every request carries a bounded
//! timeout; a slow service fails the call instead of hanging the build.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use sift_core::errors::{EmbeddingError, SiftError, SiftResult};
use sift_core::traits::IEmbeddingProvider;

/// Configuration for the HTTP embedding provider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Endpoint URL, e.g. `https://api.example.com/v1/embeddings`.
    pub url: String,
    pub model: String,
    /// Bearer token. When `None`, the `SIFT_EMBED_API_KEY` env var is used.
    pub api_key: Option<String>,
    pub dimensions: usize,
    pub timeout_secs: u64,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            url: "https://api.openai.com/v1/embeddings".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            dimensions: 1536,
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

/// Blocking HTTP client for the embedding service.
pub struct HttpProvider {
    client: reqwest::blocking::Client,
    config: HttpProviderConfig,
    api_key: Option<String>,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> SiftResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| service_err(e.to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("SIFT_EMBED_API_KEY").ok());
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

impl IEmbeddingProvider for HttpProvider {
    fn embed_batch(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({
            "model": self.config.model,
            "input": texts,
        });

        let mut request = self.client.post(&self.config.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| service_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(service_err(format!("service returned HTTP {status}")));
        }

        let parsed: EmbeddingsResponse = response.json().map_err(|e| {
            SiftError::Embedding(EmbeddingError::MalformedResponse {
                reason: e.to_string(),
            })
        })?;

        if parsed.data.len() != texts.len() {
            return Err(SiftError::Embedding(EmbeddingError::MalformedResponse {
                reason: format!(
                    "expected {} vectors, got {}",
                    texts.len(),
                    parsed.data.len()
                ),
            }));
        }

        // The service may reorder items; restore input order by index.
        let mut out: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        for item in parsed.data {
            if item.embedding.len() != self.config.dimensions {
                return Err(SiftError::Embedding(EmbeddingError::DimensionMismatch {
                    expected: self.config.dimensions,
                    got: item.embedding.len(),
                }));
            }
            if item.index >= out.len() {
                return Err(SiftError::Embedding(EmbeddingError::MalformedResponse {
                    reason: format!("item index {} out of range", item.index),
                }));
            }
            out[item.index] = Some(item.embedding);
        }

        debug!(batch = texts.len(), "embedded batch via http provider");

        out.into_iter()
            .map(|v| {
                v.ok_or_else(|| {
                    SiftError::Embedding(EmbeddingError::MalformedResponse {
                        reason: "missing item in response".to_string(),
                    })
                })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn service_err(reason: String) -> SiftError {
    SiftError::Embedding(EmbeddingError::ServiceFailed {
        attempts: 1,
        reason,
    })
}
