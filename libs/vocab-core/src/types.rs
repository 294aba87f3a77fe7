//! Core types for the vocabulary learning engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse display status of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    New,
    Learning,
    Mastered,
}

impl Default for WordStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Ordered progression of a word through the learning path.
///
/// Variant order is the stage rank: a later variant is further along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStage {
    Unseen,
    Previewed,
    QuizReady,
    QuizPassed,
    DeepLearned,
}

impl Default for LearningStage {
    fn default() -> Self {
        Self::Unseen
    }
}

impl LearningStage {
    pub const ALL: [LearningStage; 5] = [
        Self::Unseen,
        Self::Previewed,
        Self::QuizReady,
        Self::QuizPassed,
        Self::DeepLearned,
    ];
}

/// Part of speech. Anything unrecognised deserializes as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    #[serde(other)]
    Other,
}

impl Default for PartOfSpeech {
    fn default() -> Self {
        Self::Other
    }
}

/// Difficulty tier of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Intermediate
    }
}

/// Recall quality for an SM-2 review, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;
    /// Lowest quality that counts as a successful recall.
    pub const PASSING: u8 = 3;

    /// Create from a numeric value in 0..=5.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Map a binary "knew it" swipe: knew -> 4, didn't -> 1.
    pub fn from_knew_it(knew_it: bool) -> Self {
        if knew_it { Self(4) } else { Self(1) }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<u8> for Quality {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("quality must be 0-5, got {value}"))
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> Self {
        q.0
    }
}

/// Self-reported understanding after a deep-learning step, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// Confidence at or above this counts as understood.
    pub const CONFIDENT: u8 = 4;

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_confident(self) -> bool {
        self.0 >= Self::CONFIDENT
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("confidence must be 1-5, got {value}"))
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

/// Mutable learning state of a word. Content fields live on [`Word`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningState {
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<DateTime<Utc>>,
    pub status: WordStatus,
    pub learning_stage: LearningStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_quiz_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_quiz_due: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_learned_at: Option<DateTime<Utc>>,
    pub times_reviewed: u32,
    pub times_correct: u32,
    pub quiz_pass_count: u32,
    pub times_quiz_failed: u32,
    /// 0 until the word has been through a deep-learning step.
    pub feynman_confidence: u8,
}

impl Default for LearningState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            ease_factor: 2.5,
            interval_days: 1,
            next_review_date: None,
            last_review_date: None,
            status: WordStatus::New,
            learning_stage: LearningStage::Unseen,
            previewed_at: None,
            last_quiz_date: None,
            next_quiz_due: None,
            deep_learned_at: None,
            times_reviewed: 0,
            times_correct: 0,
            quiz_pass_count: 0,
            times_quiz_failed: 0,
            feynman_confidence: 0,
        }
    }
}

/// A vocabulary entry: immutable content plus its learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub term: String,
    pub definition: String,
    pub part_of_speech: PartOfSpeech,
    pub example_sentence: String,
    pub difficulty: Difficulty,
    /// Higher is more common; common words are previewed first.
    pub frequency: u32,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(flatten)]
    pub state: LearningState,
}

/// Word content as supplied by a bulk import (no learning state yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub mnemonic: Option<String>,
}

impl NewWord {
    /// Create a word with fresh learning state.
    pub fn into_word(self) -> Word {
        Word {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            term: self.term.trim().to_string(),
            definition: self.definition.trim().to_string(),
            part_of_speech: self.part_of_speech,
            example_sentence: self.example_sentence.trim().to_string(),
            difficulty: self.difficulty,
            frequency: self.frequency,
            synonyms: self.synonyms,
            antonyms: self.antonyms,
            mnemonic: self.mnemonic.filter(|m| !m.trim().is_empty()),
            state: LearningState::default(),
        }
    }
}

impl From<NewWord> for Word {
    fn from(new: NewWord) -> Self {
        new.into_word()
    }
}

/// Engine tuning shared by the planner and score estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub preview_count: usize,
    pub quiz_goal: usize,
    pub target_score: i32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            preview_count: 3,
            quiz_goal: 6,
            target_score: 160,
        }
    }
}
