//! Query orchestration: validation, search, synthesis, and degraded paths.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};

use semsearch_embeddings::ScoredResult;
use semsearch_synthesis::{AnswerSynthesizer, SynthesisError, SynthesisMode, SynthesisOutcome};

use crate::config::RetrievalConfig;
use crate::engine::SimilarityEngine;
use crate::error::Result;

/// Response to a single query.
///
/// Once the corpus is initialized every query ends in one of these variants;
/// there is no silent total failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryResponse {
    /// The query failed validation; nothing was searched.
    InvalidQuery {
        message: String,
    },

    /// No document met the relevance threshold. The diagnostic candidates,
    /// when configured, are the top unfiltered scores and claim no relevance.
    NoMatch {
        message: String,
        diagnostic_candidates: Vec<ScoredResult>,
    },

    /// Results found and synthesis succeeded.
    Matched {
        message: String,
        outcome: SynthesisOutcome,
        results: Vec<ScoredResult>,
    },

    /// Results found but synthesis failed; the raw ranking stands in.
    MatchedFallback {
        message: String,
        results: Vec<ScoredResult>,
        error: String,
    },
}

/// Composes embedding, similarity search, and answer synthesis into one
/// request-handling flow.
///
/// The orchestrator holds no per-request state: every call runs the full
/// flow and returns a terminal response. Embedding and scoring errors
/// propagate to the caller; synthesis errors degrade to a fallback response.
pub struct QueryOrchestrator {
    /// Similarity search over the embedded corpus.
    engine: SimilarityEngine,

    /// The generative collaborator.
    synthesizer: Arc<dyn AnswerSynthesizer>,

    /// Pipeline configuration.
    config: RetrievalConfig,
}

impl QueryOrchestrator {
    /// Create an orchestrator over the given engine and synthesizer.
    pub fn new(
        engine: SimilarityEngine,
        synthesizer: Arc<dyn AnswerSynthesizer>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            engine,
            synthesizer,
            config,
        }
    }

    /// Handle a single query end to end.
    pub async fn handle_query(&self, query: &str) -> Result<QueryResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(QueryResponse::InvalidQuery {
                message: "A consulta é obrigatória e deve ser uma string não vazia".to_string(),
            });
        }

        let results = self.engine.search(query, self.config.min_accuracy).await?;

        if results.is_empty() {
            info!(
                "no results above threshold {} for {query:?}",
                self.config.min_accuracy
            );

            let diagnostic_candidates = if self.config.no_match_diagnostics {
                let mut all = self.engine.search(query, 0.0).await?;
                all.truncate(self.config.diagnostic_limit);
                all
            } else {
                Vec::new()
            };

            return Ok(QueryResponse::NoMatch {
                message: format!(
                    "Não encontrei resultados relevantes com precisão acima de {:.0}%.",
                    self.config.min_accuracy * 100.0
                ),
                diagnostic_candidates,
            });
        }

        match self.synthesize(query, &results).await {
            Ok(outcome) => Ok(QueryResponse::Matched {
                message: "Resultados encontrados com base na sua pergunta.".to_string(),
                outcome,
                results,
            }),
            Err(error) => {
                warn!("synthesis failed, returning raw ranked results: {error}");
                let message = match self.config.synthesis_mode {
                    SynthesisMode::Narrative => fallback_narrative(&results),
                    SynthesisMode::Selection => {
                        "Resultados encontrados com base na sua pergunta.".to_string()
                    }
                };
                Ok(QueryResponse::MatchedFallback {
                    message,
                    results,
                    error: error.to_string(),
                })
            }
        }
    }

    /// Run the synthesizer under the configured deadline.
    async fn synthesize(
        &self,
        query: &str,
        results: &[ScoredResult],
    ) -> std::result::Result<SynthesisOutcome, SynthesisError> {
        let deadline = Duration::from_secs(self.config.synthesis_timeout_secs);
        match timeout(
            deadline,
            self.synthesizer
                .synthesize(query, results, self.config.synthesis_mode),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(SynthesisError::Timeout {
                seconds: self.config.synthesis_timeout_secs,
            }),
        }
    }
}

/// Deterministic stand-in for a narrative response when synthesis fails.
fn fallback_narrative(results: &[ScoredResult]) -> String {
    let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    format!(
        "Encontrei {} resultado(s) relevante(s): {}.",
        results.len(),
        texts.join("; ")
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fallback_narrative_is_deterministic() {
        let results = vec![
            ScoredResult::new("primeiro", 0.8),
            ScoredResult::new("segundo", 0.6),
        ];

        let text = fallback_narrative(&results);

        assert_eq!(
            text,
            "Encontrei 2 resultado(s) relevante(s): primeiro; segundo."
        );
        assert_eq!(text, fallback_narrative(&results));
    }
}
