//! Output schemas for generated content.
//!
//! The quiz schema is sent upstream as a strict structured-output
//! constraint, and the very same value is compiled here to re-check every
//! payload the model returns.  Upstream strictness is best-effort, so
//! nothing reaches the caller without passing [`OutputValidator`].

use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{RelayError, Result};
use crate::model::{BloomLevel, ChatResponse, Difficulty, Quiz};

/// Name under which the quiz schema is registered with the upstream API.
pub const QUIZ_SCHEMA_NAME: &str = "quiz_response";

/// Bounds on the number of questions in a generated quiz.
pub const MIN_QUESTIONS: usize = 5;
pub const MAX_QUESTIONS: usize = 10;

/// Every question carries exactly this many choices.
pub const CHOICES_PER_QUESTION: usize = 4;

/// Bounds on the number of follow-up questions in a tutor reply.
pub const MIN_FOLLOWUPS: usize = 1;
pub const MAX_FOLLOWUPS: usize = 3;

/// JSON Schema for a [`Quiz`].
pub fn quiz_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
    let blooms: Vec<&str> = BloomLevel::ALL.iter().map(|b| b.as_str()).collect();

    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "topic": { "type": "string" },
            "difficulty": { "type": "string", "enum": difficulties },
            "questions": {
                "type": "array",
                "minItems": MIN_QUESTIONS,
                "maxItems": MAX_QUESTIONS,
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "id": { "type": "string" },
                        "prompt": { "type": "string" },
                        "choices": {
                            "type": "array",
                            "minItems": CHOICES_PER_QUESTION,
                            "maxItems": CHOICES_PER_QUESTION,
                            "items": { "type": "string" }
                        },
                        "answerIndex": {
                            "type": "integer",
                            "minimum": 0,
                            "maximum": CHOICES_PER_QUESTION - 1
                        },
                        "explanation": { "type": "string" },
                        "bloom": { "type": "string", "enum": blooms }
                    },
                    "required": ["id", "prompt", "choices", "answerIndex", "explanation", "bloom"]
                }
            }
        },
        "required": ["topic", "difficulty", "questions"]
    })
}

/// JSON Schema for a [`ChatResponse`].  Only used locally; the chat call is
/// not schema-constrained upstream.
pub fn chat_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "response": { "type": "string" },
            "followups": {
                "type": "array",
                "minItems": MIN_FOLLOWUPS,
                "maxItems": MAX_FOLLOWUPS,
                "items": { "type": "string" }
            },
            "suggest_quiz": { "type": "boolean" }
        },
        "required": ["response", "followups", "suggest_quiz"]
    })
}

/// The `response_format` block that asks the upstream API for strict
/// quiz-shaped JSON.
pub fn quiz_response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": QUIZ_SCHEMA_NAME,
            "strict": true,
            "schema": quiz_schema(),
        }
    })
}

/// Compiled output schemas, built once at startup and shared.
pub struct OutputValidator {
    quiz: JSONSchema,
    chat: JSONSchema,
}

impl OutputValidator {
    /// Compile the built-in schemas.
    pub fn new() -> Result<Self> {
        Ok(Self {
            quiz: compile(&quiz_schema(), "quiz")?,
            chat: compile(&chat_schema(), "chat")?,
        })
    }

    /// Parse and check the model's message content as a [`Quiz`].
    pub fn parse_quiz(&self, content: &str) -> Result<Quiz> {
        parse_checked(&self.quiz, content, "Quiz")
    }

    /// Parse and check the model's message content as a [`ChatResponse`].
    pub fn parse_chat(&self, content: &str) -> Result<ChatResponse> {
        parse_checked(&self.chat, content, "Chat")
    }
}

fn compile(schema: &Value, name: &str) -> Result<JSONSchema> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| RelayError::Config {
            reason: format!("failed to compile {name} output schema: {e}"),
        })
}

fn parse_checked<T: DeserializeOwned>(
    schema: &JSONSchema,
    content: &str,
    context: &'static str,
) -> Result<T> {
    let malformed = |reason: String| RelayError::MalformedPayload { context, reason };

    let value: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

    if let Err(errors) = schema.validate(&value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(malformed(messages.join(", ")));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}
