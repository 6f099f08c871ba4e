//! One-shot embedding of the document corpus.

use tracing::{debug, info};

use semsearch_embeddings::{Embedding, ModelHandle};

use crate::error::{Result, RetrievalError};

/// A source document paired with its embedding.
#[derive(Debug, Clone)]
pub struct EmbeddedDocument {
    /// Original document text.
    pub text: String,

    /// Embedding of the text, produced at corpus initialization.
    pub embedding: Embedding,
}

/// The fixed, ordered collection of embedded source documents.
///
/// Built exactly once before queries are served and never mutated afterwards;
/// callers share it through an `Arc`. Re-initialization builds a complete new
/// value, so replacing the `Arc` is atomic from any reader's perspective and
/// no query can observe a half-replaced corpus.
#[derive(Debug)]
pub struct Corpus {
    documents: Vec<EmbeddedDocument>,
}

impl Corpus {
    /// Embed every document, in input order.
    ///
    /// Any embedding failure aborts the whole initialization; the error
    /// carries the index of the offending document.
    pub async fn initialize(handle: &ModelHandle, documents: &[String]) -> Result<Self> {
        info!(
            "initializing corpus embeddings for {} documents",
            documents.len()
        );

        let mut embedded = Vec::with_capacity(documents.len());
        for (index, text) in documents.iter().enumerate() {
            let embedding =
                handle
                    .embed(text)
                    .await
                    .map_err(|source| RetrievalError::Initialization {
                        document_index: index,
                        source,
                    })?;
            debug!("embedded document {index}");
            embedded.push(EmbeddedDocument {
                text: text.clone(),
                embedding,
            });
        }

        info!("corpus initialized with {} documents", embedded.len());
        Ok(Self {
            documents: embedded,
        })
    }

    /// The embedded documents, in corpus order.
    pub fn documents(&self) -> &[EmbeddedDocument] {
        &self.documents
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
