//! Progress records and the [`ProgressStore`] trait.
//!
//! The relay never owns this data.  Implementations hand each record to
//! a backing store and report success or failure; nothing is read back on
//! the request path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

// ═══════════════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════════════

/// Minutes spent studying a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMinutes {
    pub topic: String,
    pub minutes: u32,
}

/// The outcome of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub topic: String,
    /// Number of questions in the quiz.
    pub questions: u32,
    /// Number answered correctly.
    pub score: u32,
    /// Percentage correct, `0.0..=100.0`.
    pub accuracy: f64,
}

impl QuizAttempt {
    /// Check the constraints the integer types cannot express.
    pub fn validate(&self) -> StoreResult<()> {
        if !self.accuracy.is_finite() || !(0.0..=100.0).contains(&self.accuracy) {
            return Err(StoreError::InvalidArgument(format!(
                "accuracy must be between 0 and 100 (got {})",
                self.accuracy
            )));
        }
        Ok(())
    }
}

/// A record as written to the backing store: the payload plus a
/// time-ordered id and a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// Unique identifier (UUID v7).
    pub id: String,
    #[serde(flatten)]
    pub record: T,
    pub recorded_at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    pub fn new(record: T) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            record,
            recorded_at: Utc::now(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Trait
// ═══════════════════════════════════════════════════════════════════════

/// Write-only sink for study progress.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Short backend name for logs and status output.
    fn backend(&self) -> &'static str;

    /// Record minutes spent on a topic.
    async fn record_minutes(&self, entry: StudyMinutes) -> StoreResult<()>;

    /// Record a finished quiz attempt.
    async fn record_attempt(&self, attempt: QuizAttempt) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(accuracy: f64) -> QuizAttempt {
        QuizAttempt {
            topic: "Photosynthesis".into(),
            questions: 5,
            score: 4,
            accuracy,
        }
    }

    #[test]
    fn accuracy_bounds_are_inclusive() {
        assert!(attempt(0.0).validate().is_ok());
        assert!(attempt(80.0).validate().is_ok());
        assert!(attempt(100.0).validate().is_ok());
    }

    #[test]
    fn accuracy_outside_range_is_rejected() {
        for bad in [101.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                attempt(bad).validate(),
                Err(StoreError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn stamped_row_flattens_the_record() {
        let row = Stamped::new(StudyMinutes {
            topic: "Optics".into(),
            minutes: 15,
        });
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["topic"], "Optics");
        assert_eq!(v["minutes"], 15);
        assert!(v["id"].as_str().unwrap().len() == 36);
        assert!(v["recorded_at"].is_string());
    }

    #[test]
    fn stamped_ids_are_unique() {
        let a = Stamped::new(());
        let b = Stamped::new(());
        assert_ne!(a.id, b.id);
    }
}
