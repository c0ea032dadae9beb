//! The request → upstream → validate pipeline for both relay paths.

use crate::error::{RelayError, Result};
use crate::llm::{CallProfile, CompletionRequest, LlmClient};
use crate::model::{ChatParams, ChatResponse, Quiz, QuizParams};
use crate::prompt;
use crate::schema::OutputValidator;

/// Relays validated requests to the completion API and checks what comes
/// back.  Holds no per-request state; share it behind an `Arc`.
pub struct TutorRelay {
    llm: LlmClient,
    validator: OutputValidator,
}

impl TutorRelay {
    pub fn new(llm: LlmClient, validator: OutputValidator) -> Self {
        Self { llm, validator }
    }

    /// Build a relay with freshly compiled output schemas.
    pub fn with_client(llm: LlmClient) -> Result<Self> {
        Ok(Self::new(llm, OutputValidator::new()?))
    }

    /// Generate a quiz on the requested topic.
    ///
    /// Upstream error statuses keep a body excerpt in the error so the
    /// caller can see why generation failed.
    pub async fn generate_quiz(&self, params: &QuizParams) -> Result<Quiz> {
        let request = CompletionRequest::from_prompt(prompt::quiz_prompt(params), CallProfile::QUIZ);
        let content = self.llm.complete(&request).await?;
        let quiz = self.validator.parse_quiz(&content).inspect_err(|e| {
            tracing::warn!(topic = %params.topic, error = %e, "quiz payload rejected");
        })?;

        tracing::info!(
            topic = %params.topic,
            difficulty = %quiz.difficulty,
            questions = quiz.questions.len(),
            "quiz generated"
        );
        Ok(quiz)
    }

    /// Produce the tutor's next reply in a conversation.
    ///
    /// Upstream error statuses are reported without the body.
    pub async fn tutor_chat(&self, params: &ChatParams) -> Result<ChatResponse> {
        let request = CompletionRequest::from_prompt(prompt::tutor_prompt(params), CallProfile::CHAT);
        let content = self.llm.complete(&request).await.map_err(|e| match e {
            RelayError::UpstreamStatus { status, .. } => RelayError::UpstreamStatus {
                status,
                excerpt: None,
            },
            other => other,
        })?;

        let reply = self.validator.parse_chat(&content).inspect_err(|e| {
            tracing::warn!(topic = %params.topic, error = %e, "chat payload rejected");
        })?;

        tracing::info!(
            topic = %params.topic,
            history_turns = params.history.len(),
            followups = reply.followups.len(),
            suggest_quiz = reply.suggest_quiz,
            "tutor reply generated"
        );
        Ok(reply)
    }
}
