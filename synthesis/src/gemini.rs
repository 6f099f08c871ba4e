//! Gemini-backed answer synthesizer.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use semsearch_embeddings::ScoredResult;

use crate::AnswerSynthesizer;
use crate::error::{Result, SynthesisError};
use crate::outcome::{NarrativeOutcome, SelectionOutcome, SynthesisMode, SynthesisOutcome};
use crate::parse::{derive_confidence, parse_selection_text, strip_quotes};
use crate::prompt::{SELECTION_TOP_N, narrative_prompt, selection_prompt};

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model to use.
    model: String,
}

impl GeminiClient {
    /// Create a new client, reading the API key from `GEMINI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::new(),
            model: "gemini-1.5-flash".to_string(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check if the client is configured (API key set).
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a prompt and return the model's text response.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(SynthesisError::MissingApiKey)?;

        debug!("calling {} with {} prompt characters", self.model, prompt.len());

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiRequest(format!(
                "API error: {error_text}"
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                SynthesisError::InvalidResponse("no candidates in response".to_string())
            })
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerSynthesizer for GeminiClient {
    async fn synthesize(
        &self,
        query: &str,
        results: &[ScoredResult],
        mode: SynthesisMode,
    ) -> Result<SynthesisOutcome> {
        match mode {
            SynthesisMode::Selection => {
                let top = &results[..results.len().min(SELECTION_TOP_N)];
                let raw = self.generate(&selection_prompt(query, top)).await?;

                let parsed = parse_selection_text(&raw);
                let best_answer = strip_quotes(&parsed.best_answer).to_string();
                let confidence = derive_confidence(&best_answer, top);

                info!("selection synthesis finished with confidence {confidence}");

                Ok(SynthesisOutcome::Selection(SelectionOutcome {
                    best_answer,
                    explanation: parsed.explanation,
                    confidence,
                }))
            }
            SynthesisMode::Narrative => {
                let raw = self.generate(&narrative_prompt(query, results)).await?;

                info!("narrative synthesis finished over {} results", results.len());

                Ok(SynthesisOutcome::Narrative(NarrativeOutcome {
                    natural_response: raw.trim().to_string(),
                    relevant_results: results.iter().map(|r| r.text.clone()).collect(),
                }))
            }
        }
    }
}

/// Gemini API response format (the subset this client reads).
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::parse::{DEFAULT_BEST_ANSWER, DEFAULT_EXPLANATION};

    fn gemini_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    fn candidates() -> Vec<ScoredResult> {
        vec![
            ScoredResult::new("O gato está no telhado", 0.9),
            ScoredResult::new("O cachorro late para a lua", 0.1),
        ]
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new()
            .with_api_key("test-key")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_selection_synthesis_parses_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
                "Melhor resposta: \"O gato está no telhado\"\nExplicação: Fala do gato.",
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = client
            .synthesize("Onde está o gato?", &candidates(), SynthesisMode::Selection)
            .await
            .unwrap();

        match outcome {
            SynthesisOutcome::Selection(selection) => {
                assert_eq!(selection.best_answer, "O gato está no telhado");
                assert_eq!(selection.explanation, "Fala do gato.");
                assert_eq!(selection.confidence, 0.9);
            }
            other => panic!("expected selection outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_selection_synthesis_unlabeled_text_uses_placeholders() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(gemini_body("resposta sem formato")),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = client
            .synthesize("Onde está o gato?", &candidates(), SynthesisMode::Selection)
            .await
            .unwrap();

        match outcome {
            SynthesisOutcome::Selection(selection) => {
                assert_eq!(selection.best_answer, DEFAULT_BEST_ANSWER);
                assert_eq!(selection.explanation, DEFAULT_EXPLANATION);
                assert_eq!(selection.confidence, 0.0);
            }
            other => panic!("expected selection outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_selection_synthesis_truncates_to_top_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
                "Melhor resposta: quarto resultado\nExplicação: fora dos candidatos enviados.",
            )))
            .mount(&server)
            .await;

        let many = vec![
            ScoredResult::new("primeiro resultado", 0.9),
            ScoredResult::new("segundo resultado", 0.8),
            ScoredResult::new("terceiro resultado", 0.7),
            ScoredResult::new("quarto resultado", 0.6),
        ];

        let client = client_for(&server);
        let outcome = client
            .synthesize("alguma consulta", &many, SynthesisMode::Selection)
            .await
            .unwrap();

        match outcome {
            SynthesisOutcome::Selection(selection) => {
                // The fourth candidate is outside the top 3 handed to the
                // model, so the containment match finds no candidate.
                assert_eq!(selection.best_answer, "quarto resultado");
                assert_eq!(selection.confidence, 0.0);
            }
            other => panic!("expected selection outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_narrative_synthesis_echoes_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
                "O gato está no telhado, enquanto o cachorro late para a lua.",
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let outcome = client
            .synthesize("O que acontece?", &candidates(), SynthesisMode::Narrative)
            .await
            .unwrap();

        match outcome {
            SynthesisOutcome::Narrative(narrative) => {
                assert!(narrative.natural_response.contains("gato"));
                assert_eq!(
                    narrative.relevant_results,
                    vec![
                        "O gato está no telhado".to_string(),
                        "O cachorro late para a lua".to_string(),
                    ]
                );
            }
            other => panic!("expected narrative outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_surfaces_as_synthesis_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .synthesize("Onde está o gato?", &candidates(), SynthesisMode::Selection)
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::ApiRequest(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = GeminiClient {
            api_key: None,
            base_url: "http://localhost".to_string(),
            client: reqwest::Client::new(),
            model: "gemini-1.5-flash".to_string(),
        };

        let err = client
            .synthesize("Onde está o gato?", &candidates(), SynthesisMode::Selection)
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::MissingApiKey));
    }
}
