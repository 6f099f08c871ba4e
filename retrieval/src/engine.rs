//! Similarity search over the embedded corpus.

use std::sync::Arc;

use tracing::{debug, info};

use semsearch_embeddings::similarity::sort_by_accuracy;
use semsearch_embeddings::{ModelHandle, ScoredResult, cosine_similarity};

use crate::corpus::Corpus;
use crate::error::Result;

/// Scores queries against the embedded corpus.
///
/// Reads are lock-free: the corpus is immutable once built and the model
/// handle synchronizes its own one-time warm-up. Searching has no side
/// effects beyond logging.
pub struct SimilarityEngine {
    /// Shared embedding model handle.
    handle: Arc<ModelHandle>,

    /// The embedded corpus.
    corpus: Arc<Corpus>,
}

impl SimilarityEngine {
    /// Create an engine over the given model handle and corpus.
    pub fn new(handle: Arc<ModelHandle>, corpus: Arc<Corpus>) -> Self {
        Self { handle, corpus }
    }

    /// The corpus this engine searches.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Search the corpus for documents similar to the query.
    ///
    /// Returns every document with accuracy at or above `min_accuracy`,
    /// sorted by accuracy descending; ties keep corpus order. A
    /// `min_accuracy` of 0.0 returns the full ranked corpus.
    pub async fn search(&self, query: &str, min_accuracy: f32) -> Result<Vec<ScoredResult>> {
        debug!("searching for {query:?} with minimum accuracy {min_accuracy}");

        let query_embedding = self.handle.embed(query).await?;

        let mut results = Vec::with_capacity(self.corpus.len());
        for doc in self.corpus.documents() {
            let accuracy = cosine_similarity(&query_embedding, &doc.embedding)?;
            if accuracy >= min_accuracy {
                results.push(ScoredResult::new(doc.text.clone(), accuracy));
            }
        }

        sort_by_accuracy(&mut results);

        info!(
            "search matched {} of {} documents at threshold {min_accuracy}",
            results.len(),
            self.corpus.len()
        );
        Ok(results)
    }
}
