//! Match Analyzer — prompt → model call → structured extraction.
//!
//! A reply that cannot be parsed is not an error: the raw text is still
//! returned and `parsed` is `None`. Only provider failures are errors.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::llm_client::{ChatModel, LlmError};
use crate::matching::models::{MatchDetails, ModelReply};
use crate::matching::prompts::build_match_prompt;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Raw model text paired with the structured result, if one could be extracted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub raw_output: String,
    pub parsed_output: Option<MatchDetails>,
}

#[derive(Clone)]
pub struct MatchAnalyzer {
    model: Arc<dyn ChatModel>,
}

impl MatchAnalyzer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Scores `resume` against `job_description`. One provider call, no retries.
    pub async fn analyze(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<MatchOutcome, LlmError> {
        let prompt = build_match_prompt(resume, job_description);
        let raw_output = self.model.complete(&prompt).await?;
        let parsed_output = parse_reply(&raw_output);

        if parsed_output.is_none() {
            warn!(
                "Model reply could not be parsed into a match result ({} chars)",
                raw_output.len()
            );
        }

        Ok(MatchOutcome {
            raw_output,
            parsed_output,
        })
    }
}

/// Returns the JSON candidate inside a reply: the contents of the first
/// ```json fence (up to the next fence, or the end of the reply if unclosed),
/// otherwise the whole reply.
pub fn json_candidate(raw: &str) -> &str {
    match raw.find(JSON_FENCE_OPEN) {
        Some(start) => {
            let inner = &raw[start + JSON_FENCE_OPEN.len()..];
            let end = inner.find(FENCE_CLOSE).unwrap_or(inner.len());
            inner[..end].trim()
        }
        None => raw,
    }
}

/// Extracts and validates a match result from raw model text.
pub fn parse_reply(raw: &str) -> Option<MatchDetails> {
    serde_json::from_str::<ModelReply>(json_candidate(raw))
        .ok()?
        .into_details()
}
