//! Embedding provider adapter
//!
//! Converts free text into an embedding vector via an external generative
//! API. Failures are surfaced as [`Error::EmbeddingUnavailable`]; ranking
//! never falls back to a zero vector.

use async_trait::async_trait;
use promatch_core::{Embedding, Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

/// Upper bound on any provider round trip. The provider is a remote,
/// closed system; a slow call must become an error, not a hang.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// HTTP client for a Gemini-style `embedContent` endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: EMBEDDING_MODEL.to_string(),
        }
    }

    /// Override the provider base URL (testing, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let body = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::EmbeddingUnavailable(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        if parsed.embedding.values.is_empty() {
            return Err(Error::EmbeddingUnavailable(
                "provider returned an empty vector".to_string(),
            ));
        }

        Ok(Embedding::new(parsed.embedding.values))
    }
}
