//! Match result shapes.
//!
//! The model has answered in two schemas over time. Both are accepted as a
//! `ModelReply` and resolved once, at parse time, into the canonical `MatchDetails`.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Action recommended when a legacy reply carried no actions of its own.
pub const LEGACY_DEFAULT_ACTION: &str = "Update your resume to address the identified gaps";

/// Canonical structured result. Always reported in this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub score: u8, // 0 – 100
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub actions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Match,
    Gap,
    /// Any other tag from a legacy reply. Dropped during conversion.
    #[serde(other)]
    Other,
}

/// Legacy tagged highlight, still exposed on history records for older consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    pub description: String,
}

impl Highlight {
    pub fn strength(description: impl Into<String>) -> Self {
        Self {
            kind: HighlightKind::Match,
            description: description.into(),
        }
    }

    pub fn gap(description: impl Into<String>) -> Self {
        Self {
            kind: HighlightKind::Gap,
            description: description.into(),
        }
    }
}

impl MatchDetails {
    /// Strengths tagged `match` followed by gaps tagged `gap`.
    pub fn highlights(&self) -> Vec<Highlight> {
        self.strengths
            .iter()
            .map(Highlight::strength)
            .chain(self.gaps.iter().map(Highlight::gap))
            .collect()
    }
}

/// Splits tagged highlights back into (strengths, gaps), preserving order.
pub fn split_highlights(highlights: &[Highlight]) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut gaps = Vec::new();
    for highlight in highlights {
        match highlight.kind {
            HighlightKind::Match => strengths.push(highlight.description.clone()),
            HighlightKind::Gap => gaps.push(highlight.description.clone()),
            HighlightKind::Other => {}
        }
    }
    (strengths, gaps)
}

/// Current reply schema: separate strengths, gaps, and actions lists.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentReply {
    #[serde(deserialize_with = "whole_number")]
    pub score: i64,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub actions: Vec<String>,
    pub summary: String,
}

/// Legacy reply schema: one list of highlights tagged `match` / `gap`.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyReply {
    #[serde(deserialize_with = "whole_number")]
    pub score: i64,
    pub highlights: Vec<Highlight>,
    pub summary: String,
}

/// Integer score, also accepting floats with no fractional part (`85.0`).
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(de::Error::custom(format!("score must be a whole number, got {number}"))),
    }
}

/// Either reply schema. The current shape is tried first.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelReply {
    Current(CurrentReply),
    Legacy(LegacyReply),
}

impl ModelReply {
    /// Resolves to the canonical shape. `None` when the score is outside 0..=100.
    pub fn into_details(self) -> Option<MatchDetails> {
        match self {
            ModelReply::Current(reply) => Some(MatchDetails {
                score: checked_score(reply.score)?,
                strengths: reply.strengths,
                gaps: reply.gaps,
                actions: reply.actions,
                summary: reply.summary,
            }),
            ModelReply::Legacy(reply) => {
                let score = checked_score(reply.score)?;
                let (strengths, gaps) = split_highlights(&reply.highlights);
                Some(MatchDetails {
                    score,
                    strengths,
                    gaps,
                    actions: vec![LEGACY_DEFAULT_ACTION.to_string()],
                    summary: reply.summary,
                })
            }
        }
    }
}

fn checked_score(score: i64) -> Option<u8> {
    u8::try_from(score).ok().filter(|s| *s <= 100)
}
