//! Wire-facing types for the completion API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prompt::Prompt;
use crate::schema;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// The role of a participant in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that shape model behaviour.
    System,
    /// The rendered request.
    User,
}

/// A single message sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Call profiles
// ---------------------------------------------------------------------------

/// Per-path sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallProfile {
    /// Label used in logs and parse-error messages.
    pub label: &'static str,
    /// Token-count ceiling for the generated reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Whether to attach the strict quiz output schema.
    pub structured_quiz: bool,
}

impl CallProfile {
    /// Quiz generation.  The higher temperature favours topic diversity
    /// across repeated requests.
    pub const QUIZ: CallProfile = CallProfile {
        label: "Quiz",
        max_tokens: 2000,
        temperature: 0.7,
        structured_quiz: true,
    };

    /// Tutoring chat.
    pub const CHAT: CallProfile = CallProfile {
        label: "Chat",
        max_tokens: 500,
        temperature: 0.8,
        structured_quiz: false,
    };
}

// ---------------------------------------------------------------------------
// Completion request
// ---------------------------------------------------------------------------

/// A single request to the completion API.
///
/// The model is not part of the request; the client always sends its
/// configured model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Structured-output constraint, if any.
    pub response_format: Option<Value>,
    /// Which relay path issued the request.
    pub label: &'static str,
}

impl CompletionRequest {
    /// Build a request from a rendered prompt and a call profile.
    pub fn from_prompt(prompt: Prompt, profile: CallProfile) -> Self {
        Self {
            messages: vec![Message::system(prompt.system), Message::user(prompt.user)],
            max_tokens: profile.max_tokens,
            temperature: profile.temperature,
            response_format: profile
                .structured_quiz
                .then(schema::quiz_response_format),
            label: profile.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            system: "sys".into(),
            user: "usr".into(),
        }
    }

    #[test]
    fn quiz_profile_attaches_schema() {
        let req = CompletionRequest::from_prompt(prompt(), CallProfile::QUIZ);
        assert_eq!(req.max_tokens, 2000);
        assert!((req.temperature - 0.7).abs() < f64::EPSILON);
        assert!(req.response_format.is_some());
        assert_eq!(req.messages[0], Message::system("sys"));
        assert_eq!(req.messages[1], Message::user("usr"));
    }

    #[test]
    fn chat_profile_is_unconstrained() {
        let req = CompletionRequest::from_prompt(prompt(), CallProfile::CHAT);
        assert_eq!(req.max_tokens, 500);
        assert!((req.temperature - 0.8).abs() < f64::EPSILON);
        assert!(req.response_format.is_none());
        assert_eq!(req.label, "Chat");
    }
}
