//! Spaced repetition scheduling.

pub mod sm2;

use crate::types::LearningState;
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Result of scheduling a word after a review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: LearningState,
    pub next_due: DateTime<Utc>,
}
