//! Vocabulary learning engine.
//!
//! Provides:
//! - SM-2 review scheduling
//! - The per-word learning path (unseen -> previewed -> quiz -> deep learned)
//! - Active-recall and remediation question generation
//! - Queue planning and next-action recommendations
//! - Daily session orchestration
//! - Proficiency score estimation
//!
//! Everything operates on in-memory snapshots of [`Word`]s. Time comes from a
//! [`Clock`], randomness from any [`rand::Rng`], and persistence goes through
//! a [`WordStore`].

pub mod algorithm;
pub mod clock;
pub mod deep;
pub mod error;
pub mod matching;
pub mod planner;
pub mod question;
pub mod score;
pub mod session;
pub mod stage;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use algorithm::{SchedulingResult, Sm2};
pub use clock::{Clock, FixedClock, SystemClock};
pub use deep::{DeepMomentQuestion, DeepRemediationGenerator};
pub use error::{Result, StoreError};
pub use matching::{validate_text_answer, AnswerValidation};
pub use planner::{LearningPathPlanner, PathStats, Recommendation, RecommendedAction};
pub use question::{AnswerOption, Question, QuestionGenerator, QuestionType};
pub use score::{ScoreEstimator, ScoreInputs, ScoreReport};
pub use session::{
    DailySession, SessionConfig, SessionPhase, SessionSnapshot, SessionStats, Submission,
};
pub use stage::StageEvent;
pub use store::{MemoryStore, WordStore};
pub use types::{
    Confidence, Difficulty, EngineSettings, LearningStage, LearningState, NewWord, PartOfSpeech,
    Quality, Word, WordStatus,
};
