//! In-process progress store.
//!
//! Used when no external store is configured, and in tests.  Records live
//! only as long as the process.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreResult;
use crate::progress::{ProgressStore, QuizAttempt, Stamped, StudyMinutes};

/// Append-only, in-memory [`ProgressStore`].
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    minutes: RwLock<Vec<Stamped<StudyMinutes>>>,
    attempts: RwLock<Vec<Stamped<QuizAttempt>>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded minutes, oldest first.
    pub async fn minutes(&self) -> Vec<Stamped<StudyMinutes>> {
        self.minutes.read().await.clone()
    }

    /// Snapshot of recorded attempts, oldest first.
    pub async fn attempts(&self) -> Vec<Stamped<QuizAttempt>> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn record_minutes(&self, entry: StudyMinutes) -> StoreResult<()> {
        let row = Stamped::new(entry);
        debug!(id = %row.id, topic = %row.record.topic, minutes = row.record.minutes, "minutes recorded");
        self.minutes.write().await.push(row);
        Ok(())
    }

    async fn record_attempt(&self, attempt: QuizAttempt) -> StoreResult<()> {
        attempt.validate()?;
        let row = Stamped::new(attempt);
        debug!(id = %row.id, topic = %row.record.topic, score = row.record.score, "attempt recorded");
        self.attempts.write().await.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn records_are_kept_in_order() {
        let store = MemoryProgressStore::new();
        for minutes in [5, 10, 15] {
            store
                .record_minutes(StudyMinutes {
                    topic: "Cells".into(),
                    minutes,
                })
                .await
                .unwrap();
        }
        let rows = store.minutes().await;
        let got: Vec<u32> = rows.iter().map(|r| r.record.minutes).collect();
        assert_eq!(got, vec![5, 10, 15]);
    }

    #[tokio::test]
    async fn invalid_attempt_is_not_recorded() {
        let store = MemoryProgressStore::new();
        let err = store
            .record_attempt(QuizAttempt {
                topic: "Cells".into(),
                questions: 5,
                score: 4,
                accuracy: 101.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
        assert!(store.attempts().await.is_empty());
    }
}
