//! # feynmind-store
//!
//! Study-progress persistence for FeynMind.
//!
//! The relay does not own this data.  It hands records to a
//! [`ProgressStore`], which is either the external Supabase/PostgREST
//! project ([`RestProgressStore`]) or, when none is configured, an
//! in-process fallback ([`MemoryProgressStore`]).

pub mod error;
pub mod memory;
pub mod progress;
pub mod rest;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{StoreError, StoreResult};
pub use memory::MemoryProgressStore;
pub use progress::{ProgressStore, QuizAttempt, Stamped, StudyMinutes};
pub use rest::RestProgressStore;
