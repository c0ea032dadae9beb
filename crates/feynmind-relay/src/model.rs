//! Domain types exchanged with the client and the upstream model.
//!
//! Inbound request bodies ([`QuizRequest`], [`ChatRequest`]) keep the raw
//! wire shape so that every constraint is checked in one place
//! ([`crate::validate`]).  Outbound values ([`Quiz`], [`ChatResponse`]) are
//! only ever built from upstream payloads that already passed the output
//! schema.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Quiz difficulty.
///
/// Callers may ask for `easy`, `medium` or `hard`; the model reports
/// `mixed` when no difficulty was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    /// Values a caller is allowed to request.
    pub const REQUESTABLE: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Every value a generated quiz may carry.
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Mixed => "mixed",
        }
    }

    /// Parse a difficulty a caller asked for.  `mixed` is not requestable.
    pub fn parse_requested(raw: &str) -> Option<Self> {
        Self::REQUESTABLE.into_iter().find(|d| d.as_str() == raw)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bloom's taxonomy level attached to each generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    pub const ALL: [BloomLevel; 6] = [
        Self::Remember,
        Self::Understand,
        Self::Apply,
        Self::Analyze,
        Self::Evaluate,
        Self::Create,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remember => "remember",
            Self::Understand => "understand",
            Self::Apply => "apply",
            Self::Analyze => "analyze",
            Self::Evaluate => "evaluate",
            Self::Create => "create",
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/quiz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// One prior turn of a tutoring conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub topic: String,
    pub transcript: String,
    /// Earlier turns, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// A quiz request that passed validation.  `topic` is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizParams {
    pub topic: String,
    pub difficulty: Option<Difficulty>,
}

/// A chat request that passed validation.  Free-text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatParams {
    pub topic: String,
    pub transcript: String,
    pub history: Vec<HistoryTurn>,
}

// ---------------------------------------------------------------------------
// Generated output
// ---------------------------------------------------------------------------

/// A single multiple-choice question.
///
/// `answer_index` is bounded to `0..=3` by the output schema but is not
/// cross-checked against `choices.len()`.  The schema also pins `choices`
/// to exactly four entries, so the two agree as long as both bounds move
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    #[serde(rename = "answerIndex", deserialize_with = "integral_index")]
    pub answer_index: u8,
    pub explanation: String,
    pub bloom: BloomLevel,
}

/// Accept `answerIndex` as any integral JSON number, including `1.0`,
/// which JSON Schema also counts as an integer.
fn integral_index<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = n.as_u64() {
        return u8::try_from(i).map_err(|_| D::Error::custom(format!("index {i} out of range")));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) => Ok(f as u8),
        _ => Err(D::Error::custom(format!("expected a non-negative integer index, got {n}"))),
    }
}

/// A generated quiz, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
}

/// A tutor reply, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub followups: Vec<String>,
    pub suggest_quiz: bool,
}
