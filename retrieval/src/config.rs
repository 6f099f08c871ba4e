//! Configuration for the query pipeline.

use serde::{Deserialize, Serialize};

use semsearch_synthesis::SynthesisMode;

/// Default minimum accuracy for a document to count as relevant.
pub const DEFAULT_MIN_ACCURACY: f32 = 0.48;

/// Default cap on diagnostic candidates in a no-match response.
pub const DEFAULT_DIAGNOSTIC_LIMIT: usize = 5;

/// Configuration for the query pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Ordered list of source documents forming the corpus.
    pub documents: Vec<String>,

    /// Minimum accuracy for a result to count as relevant (0.0 to 1.0).
    pub min_accuracy: f32,

    /// Synthesis mode for this deployment.
    pub synthesis_mode: SynthesisMode,

    /// Whether a no-match response carries the top unfiltered candidates as
    /// diagnostic context. The diagnostics make no relevance claim.
    pub no_match_diagnostics: bool,

    /// Maximum number of diagnostic candidates.
    pub diagnostic_limit: usize,

    /// Timeout for the synthesis call, in seconds. Synthesis is the only
    /// step with unbounded external latency.
    pub synthesis_timeout_secs: u64,
}

impl RetrievalConfig {
    /// Create a configuration over the given corpus with default values.
    pub fn new(documents: Vec<String>) -> Self {
        Self {
            documents,
            min_accuracy: DEFAULT_MIN_ACCURACY,
            synthesis_mode: SynthesisMode::Selection,
            no_match_diagnostics: false,
            diagnostic_limit: DEFAULT_DIAGNOSTIC_LIMIT,
            synthesis_timeout_secs: 30,
        }
    }

    /// Set the minimum accuracy threshold.
    pub fn with_min_accuracy(mut self, min_accuracy: f32) -> Self {
        self.min_accuracy = min_accuracy;
        self
    }

    /// Set the synthesis mode.
    pub fn with_synthesis_mode(mut self, mode: SynthesisMode) -> Self {
        self.synthesis_mode = mode;
        self
    }

    /// Enable or disable no-match diagnostics.
    pub fn with_no_match_diagnostics(mut self, enabled: bool) -> Self {
        self.no_match_diagnostics = enabled;
        self
    }

    /// Set the synthesis timeout.
    pub fn with_synthesis_timeout_secs(mut self, secs: u64) -> Self {
        self.synthesis_timeout_secs = secs;
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new(demo_documents())
    }
}

/// The fixed demo corpus shipped with the reference deployment.
pub fn demo_documents() -> Vec<String> {
    [
        "O gato está no telhado",
        "O cachorro late para a lua",
        "Os pássaros cantam ao amanhecer",
        "O telhado tem um gato preto",
        "O melhor notebook gamer é o ideapad Gaming 3i",
        "A rússia é um país composto por ursos pardos antrópicos que vivem em uma sociedade utópica.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
