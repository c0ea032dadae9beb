//! Inbound request validation.
//!
//! Two failure classes are kept apart: a value that breaks a type, length
//! or enum constraint is an [`RelayError::InvalidRequest`]; a well-formed
//! value that is empty once trimmed is an [`RelayError::EmptyField`].
//! Constraint checks run on the value as received, emptiness checks on the
//! trimmed value.

use crate::error::{RelayError, Result};
use crate::model::{ChatParams, ChatRequest, Difficulty, QuizParams, QuizRequest};

/// Maximum topic length, in characters.
pub const MAX_TOPIC_CHARS: usize = 120;

/// Maximum transcript length, in characters.
pub const MAX_TRANSCRIPT_CHARS: usize = 2000;

/// Validate a quiz request and return its trimmed parameters.
pub fn validate_quiz(req: &QuizRequest) -> Result<QuizParams> {
    check_max_chars("topic", &req.topic, MAX_TOPIC_CHARS)?;
    let difficulty = match req.difficulty.as_deref() {
        None => None,
        Some(raw) => Some(Difficulty::parse_requested(raw).ok_or_else(|| {
            RelayError::InvalidRequest {
                reason: format!("difficulty must be one of easy, medium, hard (got `{raw}`)"),
            }
        })?),
    };

    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(RelayError::EmptyField {
            reason: "Topic cannot be empty".into(),
        });
    }

    Ok(QuizParams {
        topic: topic.to_owned(),
        difficulty,
    })
}

/// Validate a chat request and return its trimmed parameters.
pub fn validate_chat(req: &ChatRequest) -> Result<ChatParams> {
    check_max_chars("topic", &req.topic, MAX_TOPIC_CHARS)?;
    check_max_chars("transcript", &req.transcript, MAX_TRANSCRIPT_CHARS)?;

    let topic = req.topic.trim();
    let transcript = req.transcript.trim();
    if topic.is_empty() || transcript.is_empty() {
        return Err(RelayError::EmptyField {
            reason: "Topic and transcript cannot be empty".into(),
        });
    }

    Ok(ChatParams {
        topic: topic.to_owned(),
        transcript: transcript.to_owned(),
        history: req.history.clone(),
    })
}

/// Validate a free-standing topic field (used by the progress endpoints).
pub fn validate_topic(raw: &str) -> Result<String> {
    check_max_chars("topic", raw, MAX_TOPIC_CHARS)?;
    let topic = raw.trim();
    if topic.is_empty() {
        return Err(RelayError::EmptyField {
            reason: "Topic cannot be empty".into(),
        });
    }
    Ok(topic.to_owned())
}

fn check_max_chars(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(RelayError::InvalidRequest {
            reason: format!("{field} must be at most {max} characters (got {len})"),
        });
    }
    Ok(())
}
