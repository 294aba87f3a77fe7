//! Proficiency score estimation on a 130-170 scale.
//!
//! score = 145
//!       + min(15, mastered / 33)
//!       + clamp(round((accuracy - 0.7) * 25), -5, 5)
//!       + speed bonus (3 if fast and accurate, 1 if reasonably so)
//!       + min(2, deep_learned / 25)

use crate::types::{LearningStage, Word, WordStatus};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i32 = 130;
pub const MAX_SCORE: i32 = 170;
const BASE_SCORE: i32 = 145;
/// Mastered (or newly learned) words worth one point.
const WORDS_PER_POINT: u32 = 33;

/// Percentile for scores 140..=170.
const PERCENTILES: [u32; 31] = [
    13, 15, 18, 21, 25, 28, 32, 36, 40, 45, // 140-149
    49, 53, 58, 62, 66, 70, 74, 78, 81, 84, // 150-159
    86, 89, 91, 93, 94, 96, 97, 98, 98, 99, // 160-169
    99, // 170
];

/// Aggregate learning signals the estimate is based on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub mastered: u32,
    pub total: u32,
    /// Fraction of answers correct, 0 to 1.
    pub accuracy: f64,
    pub avg_response_time_secs: f64,
    pub deep_learned: u32,
}

impl ScoreInputs {
    /// Derive inputs from a word collection. Accuracy counts both SM-2
    /// reviews and quiz attempts.
    pub fn from_words(words: &[Word], avg_response_time_secs: f64) -> Self {
        let mut attempts = 0u32;
        let mut correct = 0u32;
        let mut mastered = 0u32;
        let mut deep_learned = 0u32;
        for word in words {
            let state = &word.state;
            attempts += state.times_reviewed + state.quiz_pass_count + state.times_quiz_failed;
            correct += state.times_correct + state.quiz_pass_count;
            if state.status == WordStatus::Mastered {
                mastered += 1;
            }
            if state.learning_stage == LearningStage::DeepLearned {
                deep_learned += 1;
            }
        }

        Self {
            mastered,
            total: words.len() as u32,
            accuracy: if attempts == 0 { 0.0 } else { f64::from(correct) / f64::from(attempts) },
            avg_response_time_secs,
            deep_learned,
        }
    }
}

/// Everything shown on the score screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: i32,
    pub percentile: u32,
    pub readiness: f64,
    pub target_score: i32,
    pub projected_score: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEstimator;

impl ScoreEstimator {
    pub fn estimate(&self, inputs: &ScoreInputs) -> i32 {
        let mastery_points = (inputs.mastered / WORDS_PER_POINT).min(15) as i32;
        let accuracy_points = (((inputs.accuracy - 0.7) * 25.0).round() as i32).clamp(-5, 5);
        let speed_bonus = if inputs.avg_response_time_secs < 5.0 && inputs.accuracy > 0.8 {
            3
        } else if inputs.avg_response_time_secs < 8.0 && inputs.accuracy > 0.7 {
            1
        } else {
            0
        };
        let deep_points = (inputs.deep_learned / 25).min(2) as i32;

        (BASE_SCORE + mastery_points + accuracy_points + speed_bonus + deep_points)
            .clamp(MIN_SCORE, MAX_SCORE)
    }

    pub fn percentile(&self, score: i32) -> u32 {
        match score {
            140..=170 => PERCENTILES[(score - 140) as usize],
            _ => (score - MIN_SCORE).clamp(0, 99) as u32,
        }
    }

    /// Readiness for `target` in `[0, 1]`: half vocabulary coverage, half
    /// progress from the baseline score toward the target.
    pub fn readiness(&self, inputs: &ScoreInputs, score: i32, target: i32) -> f64 {
        let coverage = if inputs.total == 0 {
            0.0
        } else {
            (f64::from(inputs.mastered) / f64::from(inputs.total)).min(1.0)
        };
        let progress = if target <= BASE_SCORE {
            if score >= target { 1.0 } else { 0.0 }
        } else {
            (f64::from(score - BASE_SCORE) / f64::from(target - BASE_SCORE)).clamp(0.0, 1.0)
        };
        0.5 * coverage + 0.5 * progress
    }

    /// Score after `days_remaining` more days at `words_per_day`.
    pub fn project(&self, score: i32, words_per_day: u32, days_remaining: u32) -> i32 {
        let gained = u64::from(words_per_day) * u64::from(days_remaining) / u64::from(WORDS_PER_POINT);
        let gained = i32::try_from(gained).unwrap_or(i32::MAX);
        score.saturating_add(gained).min(MAX_SCORE)
    }

    pub fn report(&self, inputs: &ScoreInputs, target: i32, words_per_day: u32, days_remaining: u32) -> ScoreReport {
        let score = self.estimate(inputs);
        ScoreReport {
            score,
            percentile: self.percentile(score),
            readiness: self.readiness(inputs, score, target),
            target_score: target,
            projected_score: self.project(score, words_per_day, days_remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::word;
    use pretty_assertions::assert_eq;

    fn inputs(mastered: u32, accuracy: f64, secs: f64, deep: u32) -> ScoreInputs {
        ScoreInputs {
            mastered,
            total: 500,
            accuracy,
            avg_response_time_secs: secs,
            deep_learned: deep,
        }
    }

    #[test]
    fn estimate_matches_worked_example() {
        // 145 + 3 + 4 + 3 + 2
        assert_eq!(ScoreEstimator.estimate(&inputs(99, 0.85, 4.0, 50)), 157);
    }

    #[test]
    fn estimate_is_clamped() {
        assert_eq!(ScoreEstimator.estimate(&inputs(5000, 1.0, 1.0, 500)), 170);
        assert_eq!(ScoreEstimator.estimate(&inputs(0, 0.0, 30.0, 0)), 140);
    }

    #[test]
    fn speed_bonus_tiers() {
        assert_eq!(ScoreEstimator.estimate(&inputs(0, 0.75, 6.0, 0)), 145 + 1 + 1);
        assert_eq!(ScoreEstimator.estimate(&inputs(0, 0.75, 9.0, 0)), 145 + 1);
    }

    #[test]
    fn percentile_table_and_fallback() {
        assert_eq!(ScoreEstimator.percentile(150), 49);
        assert_eq!(ScoreEstimator.percentile(170), 99);
        assert_eq!(ScoreEstimator.percentile(135), 5);
    }

    #[test]
    fn readiness_blends_coverage_and_score() {
        let inputs = inputs(250, 0.8, 6.0, 0);
        let readiness = ScoreEstimator.readiness(&inputs, 155, 165);
        assert!((readiness - 0.5).abs() < 1e-9);
        assert_eq!(ScoreEstimator.readiness(&inputs, 140, 165), 0.25);
    }

    #[test]
    fn projection_is_capped() {
        assert_eq!(ScoreEstimator.project(150, 10, 33), 160);
        assert_eq!(ScoreEstimator.project(165, 50, 365), 170);
    }

    #[test]
    fn inputs_from_words() {
        let mut a = word("a");
        a.state.times_reviewed = 4;
        a.state.times_correct = 3;
        a.state.quiz_pass_count = 3;
        a.state.learning_stage = LearningStage::DeepLearned;
        a.state.status = WordStatus::Mastered;
        let mut b = word("b");
        b.state.times_quiz_failed = 1;

        let inputs = ScoreInputs::from_words(&[a, b], 4.5);
        assert_eq!(inputs.mastered, 1);
        assert_eq!(inputs.total, 2);
        assert_eq!(inputs.deep_learned, 1);
        assert!((inputs.accuracy - 0.75).abs() < 1e-9);
    }
}
