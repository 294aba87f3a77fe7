//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use vocab_core::{
    AnswerValidation, NewWord, PathStats, Recommendation, ScoreReport, SessionSnapshot, Word,
};

use crate::state::ActiveSession;

// === Words ===

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub total: usize,
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportWordsRequest {
    pub words: Vec<NewWord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportWordsResponse {
    pub imported: usize,
    pub total: usize,
}

/// An SM-2 review. Either a 0-5 `quality` or a binary `knew_it`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub word_id: Uuid,
    #[serde(default)]
    pub quality: Option<u8>,
    #[serde(default)]
    pub knew_it: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub word: Word,
    pub next_due: DateTime<Utc>,
    pub days_to_mastery: u32,
}

// === Learning path ===

#[derive(Debug, Deserialize)]
pub struct QueuesQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueuesResponse {
    pub preview: Vec<Word>,
    pub quiz: Vec<Word>,
    pub deep_learn: Vec<Word>,
}

// === Score ===

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    #[serde(default)]
    pub avg_response_time_secs: Option<f64>,
    #[serde(default)]
    pub words_per_day: Option<u32>,
    #[serde(default)]
    pub days_remaining: Option<u32>,
}

// === Session ===

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizAnswerRequest {
    #[serde(default)]
    pub option_id: Option<usize>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeepAnswerRequest {
    pub option_id: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: SessionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValidation>,
    /// Storage failures since the last response. The session carried on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_errors: Vec<String>,
}

impl SessionResponse {
    pub fn from_session(session: &mut ActiveSession, answer: Option<AnswerValidation>) -> Self {
        Self {
            session: session.snapshot(),
            answer,
            store_errors: session
                .take_store_errors()
                .into_iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}
