//! Best-effort extraction of labeled segments from collaborator output.
//!
//! The collaborator returns free text. Parsing is never allowed to fail a
//! synthesis call: a label that cannot be found yields its documented
//! placeholder instead.

use regex_lite::Regex;
use semsearch_embeddings::ScoredResult;

/// Placeholder used when no `Melhor resposta:` segment is found.
pub const DEFAULT_BEST_ANSWER: &str = "Não foi possível determinar a melhor resposta.";

/// Placeholder used when no `Explicação:` segment is found.
pub const DEFAULT_EXPLANATION: &str = "Sem explicação disponível.";

/// The labeled segments extracted from the collaborator's free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelection {
    /// Text after the `Melhor resposta:` label, or the placeholder.
    pub best_answer: String,

    /// Text after the `Explicação:` label, or the placeholder.
    pub explanation: String,
}

/// Extract the labeled best-answer and explanation segments.
pub fn parse_selection_text(raw: &str) -> ParsedSelection {
    let best_answer = capture(raw, r"(?s)Melhor resposta:[ \t]*(.*?)(?:\n\s*Explicação:|\z)")
        .unwrap_or_else(|| DEFAULT_BEST_ANSWER.to_string());
    let explanation = capture(raw, r"(?s)Explicação:\s*(.*)\z")
        .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());

    ParsedSelection {
        best_answer,
        explanation,
    }
}

fn capture(raw: &str, pattern: &str) -> Option<String> {
    if let Ok(re) = Regex::new(pattern) {
        if let Some(cap) = re.captures(raw) {
            if let Some(segment) = cap.get(1) {
                let text = segment.as_str().trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

/// Strip surrounding quote characters from an extracted answer.
///
/// At most one quote is removed from each end; inner quoting is preserved.
pub fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['"', '\'']).unwrap_or(text);
    text.strip_suffix(['"', '\'']).unwrap_or(text)
}

/// Derive the confidence of a selected answer.
///
/// The chosen text is matched against the candidates by substring
/// containment: the first candidate whose text contains it contributes its
/// accuracy. A paraphrased answer matches no candidate and scores 0.0 even
/// when the selection itself was correct.
pub fn derive_confidence(best_answer: &str, candidates: &[ScoredResult]) -> f32 {
    candidates
        .iter()
        .find(|c| c.text.contains(best_answer))
        .map(|c| c.accuracy)
        .unwrap_or(0.0)
}
