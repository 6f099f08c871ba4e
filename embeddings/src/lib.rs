//! # Embeddings
//!
//! This crate provides embedding generation and vector similarity for the
//! semantic search pipeline.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors via an
//!   inference server
//! - **Vector Math**: Clamped cosine similarity and embedding validity checks
//! - **Shared Model Handle**: Lazy, single-flight model warm-up shared across
//!   concurrent callers
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                  Embeddings System                     │
//! ├────────────────────────────────────────────────────────┤
//! │  ModelHandle ──► EmbeddingProvider ──► Embedding       │
//! │       │                │                  │            │
//! │       ▼                ▼                  ▼            │
//! │  single-flight     TEI server      cosine_similarity   │
//! │    warm-up                                             │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, ModelHandle, TeiProvider};
pub use similarity::{ScoredResult, cosine_similarity, is_valid_embedding};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings produced by the reference model (all-MiniLM-L6-v2).
pub const DEFAULT_DIMENSION: usize = 384;
