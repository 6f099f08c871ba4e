//! # Retrieval
//!
//! This crate composes the semantic search pipeline end to end:
//!
//! - **Corpus**: a fixed ordered document list, embedded once at startup
//! - **SimilarityEngine**: threshold-filtered, deterministically ranked
//!   similarity search over the corpus
//! - **QueryOrchestrator**: the request-handling flow, including the
//!   no-match and synthesis-fallback policies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use semsearch_embeddings::{ModelHandle, TeiProvider};
//! use semsearch_retrieval::{Corpus, QueryOrchestrator, RetrievalConfig, SimilarityEngine};
//! use semsearch_synthesis::GeminiClient;
//!
//! let config = RetrievalConfig::default();
//! let handle = Arc::new(ModelHandle::new(Arc::new(TeiProvider::new("http://localhost:8080"))));
//! let corpus = Arc::new(Corpus::initialize(&handle, &config.documents).await?);
//! let engine = SimilarityEngine::new(handle, corpus);
//! let orchestrator = QueryOrchestrator::new(engine, Arc::new(GeminiClient::new()), config);
//!
//! let response = orchestrator.handle_query("Onde está o gato?").await?;
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod orchestrator;

pub use config::{DEFAULT_MIN_ACCURACY, RetrievalConfig};
pub use corpus::{Corpus, EmbeddedDocument};
pub use engine::SimilarityEngine;
pub use error::{Result, RetrievalError};
pub use orchestrator::{QueryOrchestrator, QueryResponse};

// Re-export from dependencies for convenience
pub use semsearch_embeddings::{EmbeddingProvider, ModelHandle, ScoredResult};
pub use semsearch_synthesis::{AnswerSynthesizer, SynthesisMode, SynthesisOutcome};
