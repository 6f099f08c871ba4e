//! # Answer Synthesis
//!
//! This crate is the boundary to the generative-language collaborator that
//! turns ranked search results into a final user-facing answer.
//!
//! Two modes are supported:
//!
//! - **Selection**: the collaborator picks the single best candidate among
//!   the top results and explains its choice
//! - **Narrative**: the collaborator rephrases every supplied result into one
//!   conversational response
//!
//! Synthesis failures surface as [`SynthesisError`] and are never retried
//! here; degrading to the raw ranked results is the caller's job.

pub mod error;
pub mod gemini;
pub mod outcome;
pub mod parse;
pub mod prompt;

pub use error::{Result, SynthesisError};
pub use gemini::GeminiClient;
pub use outcome::{NarrativeOutcome, SelectionOutcome, SynthesisMode, SynthesisOutcome};
pub use parse::{ParsedSelection, derive_confidence, parse_selection_text};
pub use prompt::SELECTION_TOP_N;

use async_trait::async_trait;
use semsearch_embeddings::ScoredResult;

/// Trait for answer synthesizers.
///
/// Implementations receive the full ranked list in both modes; in selection
/// mode they are responsible for truncating to the top candidates before
/// prompting.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    /// Synthesize an answer for the query from the ranked results.
    async fn synthesize(
        &self,
        query: &str,
        results: &[ScoredResult],
        mode: SynthesisMode,
    ) -> Result<SynthesisOutcome>;
}
