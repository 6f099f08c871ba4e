//! Error types for the retrieval pipeline.

use thiserror::Error;

use semsearch_embeddings::EmbeddingError;
use semsearch_synthesis::SynthesisError;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval pipeline.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The corpus failed to embed. Fatal: the system must not serve queries
    /// over a partially embedded corpus.
    #[error("corpus initialization failed at document {document_index}: {source}")]
    Initialization {
        document_index: usize,
        source: EmbeddingError,
    },

    /// Embedding error during a live query.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Synthesis error. Recoverable: the orchestrator degrades to the raw
    /// ranked results instead of failing the request.
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
}
