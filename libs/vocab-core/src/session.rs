//! Daily session orchestration.
//!
//! A session walks `preview -> quiz -> deep_moment -> complete`, skipping any
//! phase that has no words. Word updates are written through to the
//! [`WordStore`] as they happen; a failed write is logged and kept for the
//! caller, but the session always moves on.

use crate::clock::Clock;
use crate::deep::{DeepMomentQuestion, DeepRemediationGenerator};
use crate::error::StoreError;
use crate::matching::AnswerValidation;
use crate::question::{Question, QuestionGenerator};
use crate::store::WordStore;
use crate::types::{Confidence, LearningStage, Word};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Confidence recorded when a deep-moment question is answered correctly.
const DEEP_MOMENT_CONFIDENCE: u8 = 4;

/// Words chosen for a session. Fixed once the session starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub preview_words: Vec<Word>,
    pub quiz_words: Vec<Word>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_learn_word: Option<Word>,
}

impl SessionConfig {
    pub fn is_empty(&self) -> bool {
        self.preview_words.is_empty() && self.quiz_words.is_empty() && self.deep_learn_word.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub words_previewed: u32,
    pub quiz_correct: u32,
    pub quiz_incorrect: u32,
    pub deep_moment_completed: bool,
    pub deep_moment_correct: bool,
}

impl SessionStats {
    pub fn quiz_total(&self) -> u32 {
        self.quiz_correct + self.quiz_incorrect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Preview,
    Quiz,
    DeepMoment,
    Complete,
}

impl SessionPhase {
    const ORDER: [SessionPhase; 4] = [Self::Preview, Self::Quiz, Self::DeepMoment, Self::Complete];
}

/// An answer to the current quiz question.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Option(usize),
    Text(String),
}

/// Everything the presentation layer needs to render the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub progress: f64,
    pub preview_position: usize,
    pub preview_total: usize,
    pub quiz_position: usize,
    pub quiz_total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_word: Option<Word>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<AnswerValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_question: Option<DeepMomentQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_answer: Option<AnswerValidation>,
    pub stats: SessionStats,
}

pub struct DailySession<S, R = StdRng> {
    config: SessionConfig,
    words: HashMap<Uuid, Word>,
    phase: SessionPhase,
    preview_index: usize,
    quiz_index: usize,
    question: Option<Question>,
    last_answer: Option<AnswerValidation>,
    deep_question: Option<DeepMomentQuestion>,
    deep_answer: Option<AnswerValidation>,
    stats: SessionStats,
    store: S,
    clock: Arc<dyn Clock>,
    rng: R,
    questions: QuestionGenerator,
    remediation: DeepRemediationGenerator,
    store_errors: Vec<StoreError>,
}

impl<S: WordStore, R: Rng> DailySession<S, R> {
    /// Start a session in its first phase that has words.
    pub fn start(config: SessionConfig, store: S, clock: Arc<dyn Clock>, rng: R) -> Self {
        let mut words = HashMap::new();
        for word in config
            .preview_words
            .iter()
            .chain(&config.quiz_words)
            .chain(&config.deep_learn_word)
        {
            words.entry(word.id).or_insert_with(|| word.clone());
        }

        let stats = SessionStats {
            started_at: Some(clock.now()),
            ..Default::default()
        };

        let mut session = Self {
            config,
            words,
            phase: SessionPhase::Preview,
            preview_index: 0,
            quiz_index: 0,
            question: None,
            last_answer: None,
            deep_question: None,
            deep_answer: None,
            stats,
            store,
            clock,
            rng,
            questions: QuestionGenerator::default(),
            remediation: DeepRemediationGenerator,
            store_errors: Vec::new(),
        };
        let first = session.first_phase_from(0);
        session.enter(first);
        session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// The session's current copy of a word, including updates made so far.
    pub fn word(&self, id: Uuid) -> Option<&Word> {
        self.words.get(&id)
    }

    pub fn current_preview_word(&self) -> Option<&Word> {
        if self.phase != SessionPhase::Preview {
            return None;
        }
        self.config
            .preview_words
            .get(self.preview_index)
            .and_then(|w| self.words.get(&w.id))
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn last_answer(&self) -> Option<&AnswerValidation> {
        self.last_answer.as_ref()
    }

    pub fn deep_question(&self) -> Option<&DeepMomentQuestion> {
        self.deep_question.as_ref()
    }

    pub fn deep_answer(&self) -> Option<&AnswerValidation> {
        self.deep_answer.as_ref()
    }

    /// Storage failures seen so far. The session carried on regardless.
    pub fn store_errors(&self) -> &[StoreError] {
        &self.store_errors
    }

    pub fn take_store_errors(&mut self) -> Vec<StoreError> {
        std::mem::take(&mut self.store_errors)
    }

    /// Overall progress in `[0, 1]` for display only.
    pub fn progress(&self) -> f64 {
        fn fraction(done: usize, total: usize) -> f64 {
            if total == 0 { 1.0 } else { done as f64 / total as f64 }
        }
        match self.phase {
            SessionPhase::Preview => 0.2 * fraction(self.preview_index, self.config.preview_words.len()),
            SessionPhase::Quiz => 0.2 + 0.6 * fraction(self.quiz_index, self.config.quiz_words.len()),
            SessionPhase::DeepMoment => {
                if self.deep_answer.is_some() { 0.9 } else { 0.8 }
            }
            SessionPhase::Complete => 1.0,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            progress: self.progress(),
            preview_position: self.preview_index,
            preview_total: self.config.preview_words.len(),
            quiz_position: self.quiz_index,
            quiz_total: self.config.quiz_words.len(),
            preview_word: self.current_preview_word().cloned(),
            question: self.question.clone(),
            last_answer: self.last_answer.clone(),
            deep_question: self.deep_question.clone(),
            deep_answer: self.deep_answer.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Move past the current preview word, marking it previewed.
    pub fn advance_preview(&mut self) {
        if self.phase != SessionPhase::Preview {
            return;
        }
        let Some(id) = self.config.preview_words.get(self.preview_index).map(|w| w.id) else {
            self.leave(SessionPhase::Preview);
            return;
        };

        let now = self.clock.now();
        let newly_previewed = match self.words.get_mut(&id) {
            Some(word) if word.state.learning_stage == LearningStage::Unseen => {
                word.state.mark_previewed(now);
                true
            }
            _ => false,
        };
        if newly_previewed {
            self.stats.words_previewed += 1;
            self.persist(id);
        }

        self.preview_index += 1;
        if self.preview_index >= self.config.preview_words.len() {
            self.leave(SessionPhase::Preview);
        }
    }

    /// Answer the current quiz question. A question can only be answered
    /// once; later submissions return the first result.
    ///
    /// Returns `None`, changing nothing, outside the quiz phase or when the
    /// submission does not fit the question: an option id it does not offer,
    /// an option for a free-text question, or text for a multiple-choice one.
    pub fn submit(&mut self, submission: Submission) -> Option<AnswerValidation> {
        if self.phase != SessionPhase::Quiz {
            return None;
        }
        if let Some(answer) = &self.last_answer {
            return Some(answer.clone());
        }
        let question = self.question.as_ref()?;

        let validation = match &submission {
            Submission::Option(id) => question.check_option(*id),
            Submission::Text(text) => question.check_text(text),
        }?;
        if validation.is_correct {
            self.stats.quiz_correct += 1;
        } else {
            self.stats.quiz_incorrect += 1;
        }
        self.last_answer = Some(validation.clone());
        Some(validation)
    }

    /// Record the current quiz result and move to the next question.
    /// Proceeding without an answer counts as a miss.
    pub fn proceed(&mut self) {
        if self.phase != SessionPhase::Quiz {
            return;
        }
        let passed = match self.last_answer.take() {
            Some(answer) => answer.is_correct,
            None => {
                self.stats.quiz_incorrect += 1;
                false
            }
        };

        if let Some(id) = self.question.take().map(|q| q.word_id) {
            let now = self.clock.now();
            if let Some(word) = self.words.get_mut(&id) {
                word.state.record_quiz_attempt(passed, now);
            }
            self.persist(id);
        }

        self.quiz_index += 1;
        if self.quiz_index >= self.config.quiz_words.len() {
            self.leave(SessionPhase::Quiz);
        } else {
            self.prepare_question();
        }
    }

    /// Answer the deep-moment question. A correct answer completes the word's
    /// learning path.
    pub fn submit_deep(&mut self, option_id: usize) -> Option<AnswerValidation> {
        if self.phase != SessionPhase::DeepMoment {
            return None;
        }
        if let Some(answer) = &self.deep_answer {
            return Some(answer.clone());
        }
        let question = self.deep_question.as_ref()?;
        if !question.options.iter().any(|o| o.id == option_id) {
            return None;
        }
        let word_id = question.word_id;
        let correct = question.is_correct(option_id);
        let validation = if correct {
            AnswerValidation::correct(format!("Exactly. {}", question.explanation))
        } else {
            AnswerValidation::incorrect(0, format!("Not quite. {}", question.explanation))
        };

        self.stats.deep_moment_completed = true;
        self.stats.deep_moment_correct = correct;
        if correct {
            let now = self.clock.now();
            if let (Some(word), Some(confidence)) = (
                self.words.get_mut(&word_id),
                Confidence::new(DEEP_MOMENT_CONFIDENCE),
            ) {
                word.state.mark_deep_learned(confidence, now);
            }
            self.persist(word_id);
        }

        self.deep_answer = Some(validation.clone());
        Some(validation)
    }

    /// Leave the deep moment without answering.
    pub fn skip_deep(&mut self) {
        if self.phase == SessionPhase::DeepMoment {
            self.enter(SessionPhase::Complete);
        }
    }

    /// End the session now, from whatever phase it is in.
    pub fn finish(&mut self) {
        if self.phase != SessionPhase::Complete {
            self.enter(SessionPhase::Complete);
        }
    }

    fn has_content(&self, phase: SessionPhase) -> bool {
        match phase {
            SessionPhase::Preview => !self.config.preview_words.is_empty(),
            SessionPhase::Quiz => !self.config.quiz_words.is_empty(),
            SessionPhase::DeepMoment => self.config.deep_learn_word.is_some(),
            SessionPhase::Complete => true,
        }
    }

    fn first_phase_from(&self, start: usize) -> SessionPhase {
        SessionPhase::ORDER[start..]
            .iter()
            .copied()
            .find(|&phase| self.has_content(phase))
            .unwrap_or(SessionPhase::Complete)
    }

    fn leave(&mut self, phase: SessionPhase) {
        let position = SessionPhase::ORDER
            .iter()
            .position(|&p| p == phase)
            .unwrap_or(SessionPhase::ORDER.len() - 1);
        let next = self.first_phase_from((position + 1).min(SessionPhase::ORDER.len() - 1));
        self.enter(next);
    }

    fn enter(&mut self, phase: SessionPhase) {
        debug!(from = ?self.phase, to = ?phase, "session phase transition");
        self.phase = phase;
        match phase {
            SessionPhase::Preview => {}
            SessionPhase::Quiz => self.prepare_question(),
            SessionPhase::DeepMoment => {
                self.deep_question = self
                    .config
                    .deep_learn_word
                    .as_ref()
                    .and_then(|w| self.words.get(&w.id))
                    .map(|word| self.remediation.generate(word, &mut self.rng));
            }
            SessionPhase::Complete => self.complete(),
        }
    }

    fn prepare_question(&mut self) {
        self.last_answer = None;
        self.question = self
            .config
            .quiz_words
            .get(self.quiz_index)
            .and_then(|w| self.words.get(&w.id))
            .map(|word| {
                self.questions
                    .generate_random(word, &self.config.quiz_words, &mut self.rng)
            });
    }

    fn complete(&mut self) {
        self.question = None;
        self.stats.completed_at = Some(self.clock.now());
        debug!(
            answered = self.stats.quiz_total(),
            correct = self.stats.quiz_correct,
            previewed = self.stats.words_previewed,
            "session complete"
        );
        if let Err(e) = self.store.save_session_stats(&self.stats) {
            warn!(error = %e, "failed to save session stats");
            self.store_errors.push(e);
        }
    }

    fn persist(&mut self, id: Uuid) {
        let result = match self.words.get(&id) {
            Some(word) => self.store.save_word(word),
            None => return,
        };
        if let Err(e) = result {
            warn!(word_id = %id, error = %e, "failed to save word, continuing session");
            self.store_errors.push(e);
        }
    }
}
