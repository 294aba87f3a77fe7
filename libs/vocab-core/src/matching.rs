//! Answer checking for free-text submissions.
//!
//! Exact matches always pass. Definitions typed from memory are scored by
//! how many of the definition's keywords the answer mentions.

use crate::question::QuestionType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keyword overlap at or above which a recalled definition is accepted.
pub const ACCEPT_RATIO: f64 = 0.6;

/// Keyword overlap at or above which partial credit is given.
pub const PARTIAL_RATIO: f64 = 0.3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "been", "from", "into", "that", "this", "with", "which",
    "their", "there", "they", "them", "then", "than", "what", "when", "where", "who", "whom",
    "its", "his", "she", "him", "being", "were", "will", "would", "should", "could", "about",
    "such", "some", "something", "someone", "very", "more", "most", "other", "also", "each",
    "how", "way", "often", "used", "using", "especially",
];

/// Outcome of checking an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerValidation {
    pub is_correct: bool,
    /// 0 to 100.
    pub score: u32,
    pub feedback: String,
}

impl AnswerValidation {
    pub fn correct(feedback: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            score: 100,
            feedback: feedback.into(),
        }
    }

    pub fn incorrect(score: u32, feedback: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            score,
            feedback: feedback.into(),
        }
    }
}

/// Check a typed answer against the canonical one.
pub fn validate_text_answer(typed: &str, correct: &str, kind: QuestionType) -> AnswerValidation {
    let typed = normalize(typed);
    if typed.is_empty() {
        return AnswerValidation::incorrect(0, "Please enter an answer.");
    }

    if typed == normalize(correct) {
        return AnswerValidation::correct("Perfect!");
    }

    if kind != QuestionType::DefinitionRecall {
        return AnswerValidation::incorrect(0, format!("The correct answer is: {correct}"));
    }

    let ratio = keyword_overlap(&typed, correct);
    let score = (ratio * 100.0).round() as u32;
    if ratio >= ACCEPT_RATIO {
        AnswerValidation {
            is_correct: true,
            score,
            feedback: "Great! You captured the key meaning.".to_string(),
        }
    } else if ratio >= PARTIAL_RATIO {
        AnswerValidation::incorrect(
            score,
            format!("Partially correct. The full definition is: {correct}"),
        )
    } else {
        AnswerValidation::incorrect(0, format!("Not quite. The definition is: {correct}"))
    }
}

/// Trim, lowercase and collapse whitespace.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Meaningful words of a definition: longer than two characters and not a
/// stop word, in order of first appearance.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokens(text).filter(|t| t.chars().count() > 2) {
        if STOP_WORDS.contains(&token.as_str()) || keywords.contains(&token) {
            continue;
        }
        keywords.push(token);
    }
    keywords
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Fraction of the definition's keywords that appear as whole words in the
/// answer.
pub fn keyword_overlap(typed: &str, definition: &str) -> f64 {
    let keywords = extract_keywords(definition);
    if keywords.is_empty() {
        return 0.0;
    }
    let typed: HashSet<String> = tokens(typed).collect();
    let matched = keywords.iter().filter(|k| typed.contains(k.as_str())).count();
    matched as f64 / keywords.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEFINITION: &str = "Lasting for a very short time; brief and fleeting";

    #[test]
    fn empty_answer_scores_zero() {
        let result = validate_text_answer("   ", DEFINITION, QuestionType::DefinitionRecall);
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn exact_answer_scores_full() {
        let result = validate_text_answer(DEFINITION, DEFINITION, QuestionType::DefinitionRecall);
        assert!(result.is_correct);
        assert_eq!(result.score, 100);

        let result = validate_text_answer("  EPHEMERAL ", "ephemeral", QuestionType::WordFromDefinition);
        assert!(result.is_correct);
    }

    #[test]
    fn keywords_skip_short_and_stop_words() {
        assert_eq!(
            extract_keywords(DEFINITION),
            vec!["lasting", "short", "time", "brief", "fleeting"]
        );
    }

    #[test]
    fn high_overlap_is_accepted() {
        let result = validate_text_answer(
            "brief, lasting a short time",
            DEFINITION,
            QuestionType::DefinitionRecall,
        );
        assert!(result.is_correct);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn partial_overlap_gets_credit_but_fails() {
        let result = validate_text_answer("short time", DEFINITION, QuestionType::DefinitionRecall);
        assert!(!result.is_correct);
        assert_eq!(result.score, 40);
        assert!(result.feedback.starts_with("Partially correct"));
    }

    #[test]
    fn low_overlap_scores_zero() {
        let result = validate_text_answer("a kind of fish", DEFINITION, QuestionType::DefinitionRecall);
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        // "time" inside "sometimes" and "brief" inside "briefcase" do not count.
        assert_eq!(keyword_overlap("sometimes a briefcase", DEFINITION), 0.0);
        assert_eq!(keyword_overlap("Brief. Short!", DEFINITION), 0.4);
    }

    #[test]
    fn overlap_only_applies_to_definition_recall() {
        let result = validate_text_answer(
            "brief, lasting a short time",
            DEFINITION,
            QuestionType::SentenceCompletion,
        );
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }
}
