//! Embedding providers and the shared model handle.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{EmbeddingError, Result};
use crate::similarity::is_valid_embedding;
use crate::{DEFAULT_DIMENSION, Embedding};

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the model served by this provider.
    fn model(&self) -> &str;

    /// Get the dimension of the vectors this provider produces.
    fn dimension(&self) -> usize;

    /// Load or probe the underlying model, returning the confirmed dimension.
    ///
    /// Called exactly once by [`ModelHandle`] before the first embedding. The
    /// default implementation trusts the configured dimension without doing
    /// any remote work.
    async fn warm_up(&self) -> Result<usize> {
        Ok(self.dimension())
    }

    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Provider backed by a Hugging Face text-embeddings-inference server.
///
/// The reference deployment serves `all-MiniLM-L6-v2`, which produces
/// 384-dimension normalized vectors.
pub struct TeiProvider {
    /// Base URL of the inference server.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model the server is expected to serve.
    model: String,

    /// Expected embedding dimension.
    dimension: usize,
}

impl TeiProvider {
    /// Create a new provider pointing at the given inference server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            model: "all-MiniLM-L6-v2".to_string(),
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Set the expected model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for TeiProvider {
    fn name(&self) -> &str {
        "tei"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn warm_up(&self) -> Result<usize> {
        info!("loading embedding model {}", self.model);

        // A first inference both loads the remote model and confirms the
        // configured dimension. A mismatch here is a configuration error.
        let probe = self.embed("warmup").await?;
        if probe.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: probe.len(),
            });
        }

        info!(
            "embedding model {} ready ({} dimensions)",
            self.model,
            probe.len()
        );
        Ok(probe.len())
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        debug!("generating embedding for {} characters", text.len());

        let body = serde_json::json!({
            "inputs": text,
            "normalize": true
        });

        let response = self
            .client
            .post(format!("{}/embed", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "embedding server error: {error_text}"
            )));
        }

        // TEI returns one vector per input text.
        let mut batch: Vec<Embedding> = response.json().await?;
        if batch.is_empty() {
            return Err(EmbeddingError::InvalidResponse(
                "no embedding in response".to_string(),
            ));
        }

        Ok(batch.remove(0))
    }
}

/// Shared, lazily warmed handle to an embedding provider.
///
/// The first embedding request triggers a single warm-up of the underlying
/// model. Concurrent first callers park behind that one in-flight warm-up and
/// all observe the same completed result; a failed warm-up leaves the cell
/// empty so a later request retries. After warm-up the handle is read-only
/// and cheap to share.
pub struct ModelHandle {
    /// The wrapped provider.
    provider: Arc<dyn EmbeddingProvider>,

    /// Dimension confirmed by warm-up, set exactly once.
    ready: OnceCell<usize>,
}

impl ModelHandle {
    /// Create a handle around the given provider. No model work happens here.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            ready: OnceCell::new(),
        }
    }

    /// Dimension confirmed by warm-up, if warm-up has completed.
    pub fn dimension(&self) -> Option<usize> {
        self.ready.get().copied()
    }

    /// Access the wrapped provider.
    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    /// Embed a text, warming the model on first use.
    ///
    /// Every returned vector is checked against the warm-up dimension and
    /// rejected if it fails [`is_valid_embedding`], so callers never score
    /// against an inconsistent or degenerate vector.
    pub async fn embed(&self, text: &str) -> Result<Embedding> {
        let dimension = *self
            .ready
            .get_or_try_init(|| self.provider.warm_up())
            .await?;

        let embedding = self.provider.embed(text).await?;

        if embedding.len() != dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimension,
                actual: embedding.len(),
            });
        }

        if !is_valid_embedding(&embedding) {
            return Err(EmbeddingError::DegenerateEmbedding);
        }

        Ok(embedding)
    }
}
