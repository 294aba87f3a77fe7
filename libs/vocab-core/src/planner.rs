//! Learning path planning: which words to preview, quiz and deep-learn next.
//!
//! All queries are read-only views over a snapshot of the word collection.

use crate::session::SessionConfig;
use crate::types::{LearningStage, Word};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Most new words a preview recommendation asks for at once.
pub const MAX_PREVIEW_RECOMMENDATION: usize = 20;

/// Word counts across the learning path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    pub total: usize,
    pub unseen: usize,
    pub previewed: usize,
    pub quiz_ready: usize,
    pub quiz_passed: usize,
    pub deep_learned: usize,
    pub ready_for_quiz: usize,
    pub needs_deep_learn: usize,
    pub struggling: usize,
    pub mastered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    DeepLearn,
    Quiz,
    Preview,
    AllCaughtUp,
}

/// The single most useful thing to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub count: usize,
    pub reason: String,
}

pub struct LearningPathPlanner<'a> {
    words: &'a [Word],
    now: DateTime<Utc>,
}

impl<'a> LearningPathPlanner<'a> {
    pub fn new(words: &'a [Word], now: DateTime<Utc>) -> Self {
        Self { words, now }
    }

    /// Unseen words, most frequent first.
    pub fn preview_queue(&self, limit: usize) -> Vec<&'a Word> {
        let mut queue: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| w.state.learning_stage == LearningStage::Unseen)
            .collect();
        queue.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then(a.difficulty.cmp(&b.difficulty))
        });
        queue.truncate(limit);
        queue
    }

    /// Due reviews first, then words waiting for their first quiz.
    pub fn quiz_queue(&self, limit: usize) -> Vec<&'a Word> {
        let mut queue = self.due_reviews();
        queue.extend(self.first_quiz_ready());
        queue.truncate(limit);
        queue
    }

    /// Words that need a deep-learning moment, most failed first.
    pub fn deep_learn_queue(&self, limit: usize) -> Vec<&'a Word> {
        let mut queue: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| w.state.needs_deep_learning())
            .collect();
        queue.sort_by(|a, b| b.state.times_quiz_failed.cmp(&a.state.times_quiz_failed));
        queue.truncate(limit);
        queue
    }

    pub fn struggling(&self) -> Vec<&'a Word> {
        self.words.iter().filter(|w| w.state.is_struggling()).collect()
    }

    /// Words past their first quiz whose next quiz is due, most overdue first.
    pub fn due_reviews(&self) -> Vec<&'a Word> {
        let mut due: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| {
                matches!(
                    w.state.learning_stage,
                    LearningStage::QuizPassed | LearningStage::DeepLearned
                ) && w.state.is_due_for_quiz(self.now)
            })
            .collect();
        due.sort_by_key(|w| w.state.next_quiz_due);
        due
    }

    /// Previewed words that have not passed a quiz yet.
    pub fn first_quiz_ready(&self) -> Vec<&'a Word> {
        self.words
            .iter()
            .filter(|w| {
                matches!(
                    w.state.learning_stage,
                    LearningStage::Previewed | LearningStage::QuizReady
                ) && w.state.is_due_for_quiz(self.now)
            })
            .collect()
    }

    pub fn stats(&self) -> PathStats {
        let count = |stage: LearningStage| {
            self.words
                .iter()
                .filter(|w| w.state.learning_stage == stage)
                .count()
        };
        PathStats {
            total: self.words.len(),
            unseen: count(LearningStage::Unseen),
            previewed: count(LearningStage::Previewed),
            quiz_ready: count(LearningStage::QuizReady),
            quiz_passed: count(LearningStage::QuizPassed),
            deep_learned: count(LearningStage::DeepLearned),
            ready_for_quiz: self.quiz_queue(usize::MAX).len(),
            needs_deep_learn: self.deep_learn_queue(usize::MAX).len(),
            struggling: self.struggling().len(),
            mastered: self
                .words
                .iter()
                .filter(|w| w.state.meets_mastery_criteria())
                .count(),
        }
    }

    /// The highest-priority next action. Struggling words always come first.
    pub fn recommendation(&self) -> Recommendation {
        let struggling = self.struggling().len();
        if struggling > 0 {
            return Recommendation {
                action: RecommendedAction::DeepLearn,
                count: struggling,
                reason: format!(
                    "{} keep tripping you up. A deep-learning moment will help them stick.",
                    words(struggling)
                ),
            };
        }

        let due = self.due_reviews().len();
        if due > 0 {
            return Recommendation {
                action: RecommendedAction::Quiz,
                count: due,
                reason: format!("{} due for a quiz review.", words_are(due)),
            };
        }

        let ready = self.first_quiz_ready().len();
        if ready > 0 {
            return Recommendation {
                action: RecommendedAction::Quiz,
                count: ready,
                reason: format!("{} previewed and ready for a first quiz.", words_are(ready)),
            };
        }

        let deep = self
            .deep_learn_queue(usize::MAX)
            .iter()
            .filter(|w| !w.state.is_struggling())
            .count();
        if deep > 0 {
            return Recommendation {
                action: RecommendedAction::DeepLearn,
                count: deep,
                reason: format!("{} could use a deeper look.", words(deep)),
            };
        }

        let unseen = self.preview_queue(usize::MAX).len();
        if unseen > 0 {
            let count = unseen.min(MAX_PREVIEW_RECOMMENDATION);
            return Recommendation {
                action: RecommendedAction::Preview,
                count,
                reason: format!("Preview {} to keep building your vocabulary.", new_words(count)),
            };
        }

        Recommendation {
            action: RecommendedAction::AllCaughtUp,
            count: 0,
            reason: "All caught up! Come back later for more reviews.".to_string(),
        }
    }

    /// Plan a daily session.
    ///
    /// Quiz slots go to due reviews (up to half the goal), then first quizzes,
    /// then any remaining due reviews, then the words previewed in this same
    /// session.
    pub fn build_session<R: Rng + ?Sized>(
        &self,
        preview_count: usize,
        quiz_goal: usize,
        rng: &mut R,
    ) -> SessionConfig {
        let preview = self.preview_queue(preview_count);
        let due = self.due_reviews();
        let review_cap = quiz_goal / 2;

        let mut picked: HashSet<Uuid> = HashSet::new();
        let mut quiz: Vec<&Word> = Vec::with_capacity(quiz_goal);
        let mut fill = |candidates: &[&'a Word], cap: usize, quiz: &mut Vec<&'a Word>| {
            for &word in candidates {
                if quiz.len() >= cap {
                    break;
                }
                if picked.insert(word.id) {
                    quiz.push(word);
                }
            }
        };

        fill(&due, review_cap, &mut quiz);
        fill(&self.first_quiz_ready(), quiz_goal, &mut quiz);
        fill(&due, quiz_goal, &mut quiz);
        fill(&preview, quiz_goal, &mut quiz);

        quiz.shuffle(rng);
        quiz.truncate(quiz_goal);

        SessionConfig {
            preview_words: preview.into_iter().cloned().collect(),
            quiz_words: quiz.into_iter().cloned().collect(),
            deep_learn_word: self.deep_learn_queue(1).first().map(|w| (*w).clone()),
        }
    }
}

fn words(n: usize) -> String {
    if n == 1 { "1 word".to_string() } else { format!("{n} words") }
}

fn words_are(n: usize) -> String {
    if n == 1 { "1 word is".to_string() } else { format!("{n} words are") }
}

fn new_words(n: usize) -> String {
    if n == 1 { "1 new word".to_string() } else { format!("{n} new words") }
}
