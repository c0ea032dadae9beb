//! Relay core for FeynMind.
//!
//! Turns quiz and tutoring requests into prompts for an upstream
//! Chat Completions API, makes exactly one call per request, and checks the
//! model's JSON against strict output schemas before handing it back.
//!
//! ```text
//! request ──> validate ──> prompt ──> LlmClient ──> OutputValidator ──> Quiz / ChatResponse
//! ```
//!
//! ## Modules
//!
//! - [`validate`] -- Inbound request checks (schema vs. precondition failures).
//! - [`prompt`] -- System/user prompt rendering.
//! - [`llm`] -- Completion API client and wire types.
//! - [`schema`] -- Output schemas, shared by the upstream constraint and local validation.
//! - [`relay`] -- The end-to-end pipeline for both paths.
//! - [`config`] -- Process settings.
//! - [`error`] -- Relay error types.

pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod prompt;
pub mod relay;
pub mod schema;
pub mod validate;

pub use config::{Settings, SupabaseSettings};
pub use error::{RelayError, Result};
pub use llm::{LlmClient, LlmClientConfig};
pub use model::{
    BloomLevel, ChatParams, ChatRequest, ChatResponse, Difficulty, HistoryTurn, Quiz, QuizParams,
    QuizQuestion, QuizRequest,
};
pub use relay::TutorRelay;
pub use schema::OutputValidator;
