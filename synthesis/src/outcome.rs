//! Synthesis request and response data model.

use serde::{Deserialize, Serialize};

/// How the synthesizer should treat the ranked results.
///
/// The mode is a deployment configuration, not a per-request switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisMode {
    /// Pick the single best candidate among the top results.
    Selection,
    /// Rephrase all results into one conversational response.
    Narrative,
}

/// The single best candidate chosen by the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    /// Text of the chosen candidate, surrounding quote characters stripped.
    pub best_answer: String,

    /// Why the synthesizer picked it.
    pub explanation: String,

    /// Accuracy of the candidate whose text contains the chosen answer, or
    /// 0.0 when no candidate contains it.
    pub confidence: f32,
}

/// A conversational rephrasing of every supplied result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeOutcome {
    /// The free-text response referencing all results.
    pub natural_response: String,

    /// The input texts, echoed for downstream consumers.
    pub relevant_results: Vec<String>,
}

/// Outcome of a synthesis call, one variant per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SynthesisOutcome {
    /// Produced in [`SynthesisMode::Selection`].
    Selection(SelectionOutcome),
    /// Produced in [`SynthesisMode::Narrative`].
    Narrative(NarrativeOutcome),
}
