//! Learning-path state machine.
//!
//! Each word moves through `unseen -> previewed -> quiz_ready -> quiz_passed
//! -> deep_learned`. Transitions are driven by [`StageEvent`]s and resolved
//! by a single table in [`LearningStage::on`]; an event that does not move
//! the word returns `None` and leaves the stage untouched.

use crate::types::{Confidence, LearningStage, LearningState, WordStatus};
use chrono::{DateTime, Duration, Utc};

/// Days until the next quiz, indexed by `min(quiz_pass_count - 1, 5)`.
pub const QUIZ_INTERVALS_DAYS: [i64; 6] = [1, 3, 7, 14, 30, 60];

/// Failed quizzes after which a word counts as struggling.
pub const STRUGGLING_FAILURES: u32 = 2;

/// Quiz passes required (with deep learning) for mastery.
pub const MASTERY_QUIZ_PASSES: u32 = 3;

/// Something that happened to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    Previewed,
    QuizPassed,
    QuizFailed,
    DeepLearned { confident: bool },
}

impl LearningStage {
    /// Stage reached after `event`, or `None` if the event does not move the word.
    pub fn on(self, event: StageEvent) -> Option<LearningStage> {
        use LearningStage::*;
        match (self, event) {
            (Unseen, StageEvent::Previewed) => Some(Previewed),
            (Unseen | Previewed | QuizReady, StageEvent::QuizPassed) => Some(QuizPassed),
            (QuizPassed | DeepLearned, StageEvent::QuizPassed) => None,
            (DeepLearned, StageEvent::DeepLearned { .. }) => None,
            (_, StageEvent::DeepLearned { confident: true }) => Some(DeepLearned),
            (_, StageEvent::DeepLearned { confident: false }) => None,
            (_, StageEvent::QuizFailed) => None,
            (Previewed | QuizReady | QuizPassed | DeepLearned, StageEvent::Previewed) => None,
        }
    }
}

impl LearningState {
    fn apply_event(&mut self, event: StageEvent) -> bool {
        match self.learning_stage.on(event) {
            Some(next) => {
                self.learning_stage = next;
                true
            }
            None => false,
        }
    }

    /// Mark the word as previewed. Only has an effect on unseen words.
    pub fn mark_previewed(&mut self, now: DateTime<Utc>) {
        if !self.apply_event(StageEvent::Previewed) {
            return;
        }
        self.previewed_at = Some(now);
        if self.status == WordStatus::New {
            self.status = WordStatus::Learning;
        }
        self.update_mastery_status();
    }

    /// Record a quiz attempt and schedule the next quiz.
    ///
    /// A pass advances the stage (never past `quiz_passed`) and spaces the next
    /// quiz out along [`QUIZ_INTERVALS_DAYS`]; a fail brings the quiz back
    /// tomorrow without regressing the stage.
    pub fn record_quiz_attempt(&mut self, passed: bool, now: DateTime<Utc>) {
        self.last_quiz_date = Some(now);
        if passed {
            self.apply_event(StageEvent::QuizPassed);
            self.quiz_pass_count += 1;
            let index = (self.quiz_pass_count as usize - 1).min(QUIZ_INTERVALS_DAYS.len() - 1);
            self.next_quiz_due = Some(now + Duration::days(QUIZ_INTERVALS_DAYS[index]));
        } else {
            self.apply_event(StageEvent::QuizFailed);
            self.times_quiz_failed += 1;
            self.next_quiz_due = Some(now + Duration::days(1));
        }
        self.update_mastery_status();
    }

    /// Record how well the learner can explain the word. Only a confident
    /// answer completes the learning path.
    pub fn mark_deep_learned(&mut self, confidence: Confidence, now: DateTime<Utc>) {
        self.feynman_confidence = confidence.value();
        self.deep_learned_at = Some(now);
        self.apply_event(StageEvent::DeepLearned {
            confident: confidence.is_confident(),
        });
        self.update_mastery_status();
    }

    pub fn meets_mastery_criteria(&self) -> bool {
        self.quiz_pass_count >= MASTERY_QUIZ_PASSES
            && self.learning_stage == LearningStage::DeepLearned
            && self.feynman_confidence >= Confidence::CONFIDENT
    }

    /// Recompute the display status from the learning path.
    pub fn update_mastery_status(&mut self) {
        self.status = if self.meets_mastery_criteria() {
            WordStatus::Mastered
        } else if self.learning_stage > LearningStage::Unseen || self.status == WordStatus::Mastered {
            WordStatus::Learning
        } else {
            self.status
        };
    }

    /// SM-2 review is due (or was never scheduled).
    pub fn is_due_for_review(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date.map_or(true, |due| now >= due)
    }

    pub fn is_due_for_quiz(&self, now: DateTime<Utc>) -> bool {
        match self.next_quiz_due {
            Some(due) => now >= due,
            None => matches!(
                self.learning_stage,
                LearningStage::Previewed | LearningStage::QuizReady | LearningStage::QuizPassed
            ),
        }
    }

    pub fn is_struggling(&self) -> bool {
        self.times_quiz_failed >= STRUGGLING_FAILURES
    }

    pub fn needs_deep_learning(&self) -> bool {
        self.is_struggling()
            || (self.learning_stage == LearningStage::QuizPassed
                && self.feynman_confidence < Confidence::CONFIDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::now;
    use pretty_assertions::assert_eq;

    fn confidence(value: u8) -> Confidence {
        Confidence::new(value).unwrap()
    }

    fn at_stage(stage: LearningStage) -> LearningState {
        LearningState {
            learning_stage: stage,
            ..Default::default()
        }
    }

    #[test]
    fn preview_is_idempotent() {
        let mut once = LearningState::default();
        once.mark_previewed(now());

        let mut twice = LearningState::default();
        twice.mark_previewed(now());
        twice.mark_previewed(now() + Duration::hours(3));

        assert_eq!(once, twice);
        assert_eq!(once.learning_stage, LearningStage::Previewed);
        assert_eq!(once.status, WordStatus::Learning);
        assert_eq!(once.previewed_at, Some(now()));
    }

    #[test]
    fn preview_ignored_past_unseen() {
        let mut state = at_stage(LearningStage::QuizPassed);
        state.mark_previewed(now());
        assert_eq!(state.learning_stage, LearningStage::QuizPassed);
        assert_eq!(state.previewed_at, None);
    }

    #[test]
    fn quiz_pass_never_lowers_stage() {
        for stage in LearningStage::ALL {
            let mut state = at_stage(stage);
            state.record_quiz_attempt(true, now());
            assert!(state.learning_stage >= stage);
            assert!(state.learning_stage >= LearningStage::QuizPassed);
        }
    }

    #[test]
    fn quiz_fail_never_changes_stage() {
        for stage in LearningStage::ALL {
            let mut state = at_stage(stage);
            state.record_quiz_attempt(false, now());
            assert_eq!(state.learning_stage, stage);
            assert_eq!(state.times_quiz_failed, 1);
            assert_eq!(state.next_quiz_due, Some(now() + Duration::days(1)));
        }
    }

    #[test]
    fn quiz_passes_escalate_schedule() {
        let mut state = at_stage(LearningStage::Previewed);
        let mut gaps = Vec::new();
        for _ in 0..8 {
            state.record_quiz_attempt(true, now());
            gaps.push((state.next_quiz_due.unwrap() - now()).num_days());
        }
        assert_eq!(gaps, vec![1, 3, 7, 14, 30, 60, 60, 60]);
        assert_eq!(state.quiz_pass_count, 8);
    }

    #[test]
    fn deep_learning_needs_confidence() {
        let mut state = at_stage(LearningStage::QuizPassed);
        state.mark_deep_learned(confidence(3), now());
        assert_eq!(state.learning_stage, LearningStage::QuizPassed);
        assert_eq!(state.feynman_confidence, 3);

        state.mark_deep_learned(confidence(4), now());
        assert_eq!(state.learning_stage, LearningStage::DeepLearned);
    }

    #[test]
    fn mastery_requires_all_three_conditions() {
        let mut state = at_stage(LearningStage::Previewed);
        for _ in 0..3 {
            state.record_quiz_attempt(true, now());
        }
        assert_eq!(state.status, WordStatus::Learning);

        state.mark_deep_learned(confidence(5), now());
        assert_eq!(state.status, WordStatus::Mastered);
    }

    #[test]
    fn quiz_due_without_schedule_depends_on_stage() {
        assert!(!at_stage(LearningStage::Unseen).is_due_for_quiz(now()));
        assert!(at_stage(LearningStage::Previewed).is_due_for_quiz(now()));
        assert!(at_stage(LearningStage::QuizPassed).is_due_for_quiz(now()));
        assert!(!at_stage(LearningStage::DeepLearned).is_due_for_quiz(now()));

        let mut state = at_stage(LearningStage::QuizPassed);
        state.next_quiz_due = Some(now() + Duration::days(2));
        assert!(!state.is_due_for_quiz(now()));
        assert!(state.is_due_for_quiz(now() + Duration::days(2)));
    }

    #[test]
    fn review_due_when_unscheduled() {
        let mut state = LearningState::default();
        assert!(state.is_due_for_review(now()));
        state.next_review_date = Some(now() + Duration::days(1));
        assert!(!state.is_due_for_review(now()));
    }

    #[test]
    fn needs_deep_learning_rules() {
        let mut failing = at_stage(LearningStage::Previewed);
        failing.times_quiz_failed = 2;
        assert!(failing.needs_deep_learning());

        let passed = at_stage(LearningStage::QuizPassed);
        assert!(passed.needs_deep_learning());

        let mut confident = at_stage(LearningStage::QuizPassed);
        confident.feynman_confidence = 4;
        assert!(!confident.needs_deep_learning());
    }
}
