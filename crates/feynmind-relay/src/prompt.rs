//! Prompt rendering for the two relay paths.

use crate::model::{ChatParams, HistoryTurn, QuizParams};

const QUIZ_SYSTEM_PROMPT: &str =
    "Create a quiz with 5-7 multiple choice questions. Return JSON format only.";

const TUTOR_SYSTEM_PROMPT: &str =
    "You are a tutor. Ask probing questions to check understanding of the user. Keep it short.";

/// A rendered system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn quiz_prompt(params: &QuizParams) -> Prompt {
    let difficulty = params.difficulty.map_or("mixed", |d| d.as_str());
    Prompt {
        system: QUIZ_SYSTEM_PROMPT.to_owned(),
        user: format!(
            "Make a quiz about {topic}. Difficulty: {difficulty}. Return JSON with topic, \
             difficulty, and a questions array with id, prompt, 4 choices, answerIndex, \
             explanation, and bloom level.",
            topic = params.topic,
        ),
    }
}

pub fn tutor_prompt(params: &ChatParams) -> Prompt {
    Prompt {
        system: TUTOR_SYSTEM_PROMPT.to_owned(),
        user: format!(
            "Topic: {topic}\nStudent said: {transcript}\nChat history: {history}\n\
             Respond with JSON that has response, followups array, and suggest_quiz boolean.",
            topic = params.topic,
            transcript = params.transcript,
            history = history_json(&params.history),
        ),
    }
}

/// Serialize the conversation history as a JSON array, oldest turn first.
fn history_json(history: &[HistoryTurn]) -> String {
    serde_json::to_string(history).unwrap_or_else(|_| "[]".to_owned())
}
