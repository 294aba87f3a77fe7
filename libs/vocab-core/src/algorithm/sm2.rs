//! SM-2 spaced repetition algorithm.
//!
//! Classic SuperMemo 2 over a 0-5 recall quality:
//! 1. EF' = max(1.3, EF + 0.1 - (5-q) * (0.08 + (5-q) * 0.02))
//! 2. q < 3: repetitions reset to 0, interval to 1 day
//! 3. q >= 3: first success -> 1 day, second -> 6 days, then round(interval * EF')
//!
//! Intervals are capped at `maximum_interval_days`.

use super::SchedulingResult;
use crate::types::{LearningState, Quality, Word, WordStatus};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    pub maximum_interval_days: u32,
    /// Consecutive successful reviews after which SM-2 considers a word mastered.
    pub mastery_repetitions: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: 1.3,
            maximum_interval_days: 36_500,
            mastery_repetitions: 5,
        }
    }
}

impl Sm2 {
    /// Calculate the next review state after a response.
    pub fn schedule(&self, state: &LearningState, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let new_ease = self.next_ease(state.ease_factor, quality);

        let (repetitions, interval) = if quality.is_passing() {
            let repetitions = state.repetitions + 1;
            (repetitions, self.next_interval(repetitions, state.interval_days, new_ease))
        } else {
            (0, 1)
        };

        let next_due = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut new_state = LearningState {
            repetitions,
            ease_factor: new_ease,
            interval_days: interval,
            next_review_date: Some(next_due),
            last_review_date: Some(now),
            times_reviewed: state.times_reviewed + 1,
            times_correct: state.times_correct + u32::from(quality.is_passing()),
            ..state.clone()
        };
        new_state.status = self.status_for(&new_state);

        SchedulingResult { new_state, next_due }
    }

    /// Apply a response to a word and return the updated word.
    pub fn apply_response(&self, word: &Word, quality: Quality, now: DateTime<Utc>) -> Word {
        let result = self.schedule(&word.state, quality, now);
        Word {
            state: result.new_state,
            ..word.clone()
        }
    }

    /// Binary "knew it / didn't" review.
    pub fn apply_swipe(&self, word: &Word, knew_it: bool, now: DateTime<Utc>) -> Word {
        self.apply_response(word, Quality::from_knew_it(knew_it), now)
    }

    /// Days of successful reviews still needed to reach mastery, assuming the
    /// ease factor holds steady.
    pub fn estimated_days_to_mastery(&self, word: &Word) -> u32 {
        let remaining = self.mastery_repetitions.saturating_sub(word.state.repetitions);
        let ease = word.state.ease_factor.max(self.minimum_ease);

        let mut repetitions = word.state.repetitions;
        let mut interval = word.state.interval_days;
        let mut total: u32 = 0;
        for _ in 0..remaining {
            repetitions += 1;
            interval = self.next_interval(repetitions, interval, ease);
            total = total.saturating_add(interval);
        }
        total
    }

    fn next_ease(&self, ease: f64, quality: Quality) -> f64 {
        let miss = f64::from(Quality::MAX - quality.value());
        (ease + 0.1 - miss * (0.08 + miss * 0.02)).max(self.minimum_ease)
    }

    fn next_interval(&self, repetitions: u32, previous: u32, ease: f64) -> u32 {
        let interval = match repetitions {
            0 | 1 => 1,
            2 => 6,
            _ => ((f64::from(previous) * ease).round() as u32).max(1),
        };
        interval.min(self.maximum_interval_days)
    }

    fn status_for(&self, state: &LearningState) -> WordStatus {
        let status = if state.repetitions >= self.mastery_repetitions {
            WordStatus::Mastered
        } else if state.repetitions > 0 {
            WordStatus::Learning
        } else {
            WordStatus::New
        };

        // Mastered additionally requires the learning path to be complete.
        if status == WordStatus::Mastered && !state.meets_mastery_criteria() {
            WordStatus::Learning
        } else {
            status
        }
    }
}
