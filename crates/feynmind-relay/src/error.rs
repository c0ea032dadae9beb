//! Relay error types.
//!
//! Every relay operation surfaces failures through [`RelayError`].  The
//! variants split along who is at fault: the caller's input (schema or
//! precondition), the upstream completion API (status, transport, timeout,
//! payload shape), or the local process configuration.

use std::time::Duration;

/// Unified error type for the relay core.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    // -- Caller input --------------------------------------------------------
    /// A field is present but violates its type, length or enum constraint.
    #[error("{reason}")]
    InvalidRequest { reason: String },

    /// A required free-text field is empty once surrounding whitespace is
    /// removed.
    #[error("{reason}")]
    EmptyField { reason: String },

    // -- Upstream ------------------------------------------------------------
    /// The completion API answered with a non-success status.
    ///
    /// `excerpt` holds the leading part of the upstream body when the call
    /// site chose to keep it for diagnostics.
    #[error("{}", upstream_status_detail(.excerpt))]
    UpstreamStatus { status: u16, excerpt: Option<String> },

    /// The HTTP exchange with the completion API failed.
    #[error("upstream request failed: {reason}")]
    UpstreamTransport { reason: String },

    /// The completion API did not answer within the configured bound.
    #[error("upstream request timed out after {timeout:?}")]
    UpstreamTimeout { timeout: Duration },

    /// The completion API answered, but its payload does not have the
    /// expected shape.
    #[error("{context} parse error: {reason}")]
    MalformedPayload {
        context: &'static str,
        reason: String,
    },

    // -- Configuration -------------------------------------------------------
    /// No API key was configured for the completion API.
    #[error("missing api key: {variable} is not set")]
    MissingApiKey { variable: &'static str },

    /// Configuration could not be loaded or is inconsistent.
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the relay crate.
pub type Result<T> = std::result::Result<T, RelayError>;

fn upstream_status_detail(excerpt: &Option<String>) -> String {
    match excerpt {
        Some(text) => format!("OpenAI error: {text}"),
        None => "API error".to_owned(),
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamTransport {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_detail_with_excerpt() {
        let err = RelayError::UpstreamStatus {
            status: 429,
            excerpt: Some("rate limited".into()),
        };
        assert_eq!(err.to_string(), "OpenAI error: rate limited");
    }

    #[test]
    fn upstream_status_detail_without_excerpt() {
        let err = RelayError::UpstreamStatus {
            status: 500,
            excerpt: None,
        };
        assert_eq!(err.to_string(), "API error");
    }

    #[test]
    fn malformed_payload_names_its_context() {
        let err = RelayError::MalformedPayload {
            context: "Quiz",
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Quiz parse error: expected value at line 1 column 1"
        );
    }

    #[test]
    fn timeout_reports_the_configured_bound() {
        let err = RelayError::UpstreamTimeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "upstream request timed out after 250ms");
    }
}
