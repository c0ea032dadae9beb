//! PostgREST-backed progress store (Supabase).
//!
//! Each record becomes one `POST {base}/rest/v1/{table}` with the service
//! role key in both the `apikey` and bearer headers.  The store returns no
//! representation (`Prefer: return=minimal`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::{StoreError, StoreResult};
use crate::progress::{ProgressStore, QuizAttempt, Stamped, StudyMinutes};

/// Table receiving [`StudyMinutes`] rows.
pub const MINUTES_TABLE: &str = "study_minutes";

/// Table receiving [`QuizAttempt`] rows.
pub const ATTEMPTS_TABLE: &str = "quiz_attempts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How much of a rejected insert's body is kept in the error.
pub const ERROR_EXCERPT_CHARS: usize = 300;

/// Writes progress rows to a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct RestProgressStore {
    base_url: String,
    http: reqwest::Client,
}

impl RestProgressStore {
    /// Create a store for the project at `base_url`, authenticating with
    /// `service_role`.
    pub fn new(base_url: impl Into<String>, service_role: &str) -> StoreResult<Self> {
        let key = HeaderValue::from_str(service_role)
            .map_err(|e| StoreError::Config(format!("invalid service role key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {service_role}"))
            .map_err(|e| StoreError::Config(format!("invalid service role key: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> StoreResult<()> {
        let url = self.table_url(table);
        debug!(url = %url, "inserting progress row");

        let resp = self.http.post(&url).json(row).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) => excerpt(&text, ERROR_EXCERPT_CHARS),
                Err(e) => {
                    warn!(table, error = %e, "failed to read rejected insert body");
                    String::new()
                }
            };
            warn!(table, status = status.as_u16(), "progress store rejected insert");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[async_trait]
impl ProgressStore for RestProgressStore {
    fn backend(&self) -> &'static str {
        "supabase"
    }

    #[instrument(skip(self))]
    async fn record_minutes(&self, entry: StudyMinutes) -> StoreResult<()> {
        self.insert(MINUTES_TABLE, &Stamped::new(entry)).await
    }

    #[instrument(skip(self))]
    async fn record_attempt(&self, attempt: QuizAttempt) -> StoreResult<()> {
        attempt.validate()?;
        self.insert(ATTEMPTS_TABLE, &Stamped::new(attempt)).await
    }
}
