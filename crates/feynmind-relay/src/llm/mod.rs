//! Upstream completion API integration.
//!
//! - [`types`] -- Messages, per-path call profiles and the request type.
//! - [`client`] -- HTTP client for the OpenAI Chat Completions API.

pub mod client;
pub mod types;

pub use client::{LlmClient, LlmClientConfig};
pub use types::{CallProfile, CompletionRequest, Message, Role};
