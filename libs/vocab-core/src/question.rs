//! Active-recall question generation.
//!
//! Six question variants are built from a word and a pool of other words
//! used as distractor sources. A variant whose data is missing (no synonyms,
//! no usable example sentence, no other words to draw from) degrades to a
//! free-text definition question.

use crate::matching::{normalize, validate_text_answer, AnswerValidation};
use crate::types::Word;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

const BLANK: &str = "_____";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    DefinitionRecall,
    SentenceCompletion,
    SynonymSelection,
    AntonymSelection,
    DefinitionMatch,
    WordFromDefinition,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        Self::DefinitionRecall,
        Self::SentenceCompletion,
        Self::SynonymSelection,
        Self::AntonymSelection,
        Self::DefinitionMatch,
        Self::WordFromDefinition,
    ];

    /// Whether the answer is typed rather than picked from options.
    pub fn is_free_text(self) -> bool {
        self == Self::DefinitionRecall
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: usize,
    pub text: String,
    pub is_correct: bool,
}

/// A question ready to present. Built per presentation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub word_id: Uuid,
    pub kind: QuestionType,
    pub prompt: String,
    /// Empty for free-text questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    /// Check a chosen option. `None` if the question has no such option.
    pub fn check_option(&self, option_id: usize) -> Option<AnswerValidation> {
        let option = self.options.iter().find(|o| o.id == option_id)?;
        Some(if option.is_correct {
            AnswerValidation::correct("Correct!")
        } else {
            AnswerValidation::incorrect(0, format!("The correct answer is: {}", self.correct_answer))
        })
    }

    /// Check a typed answer. `None` unless the question takes free text.
    pub fn check_text(&self, typed: &str) -> Option<AnswerValidation> {
        self.kind
            .is_free_text()
            .then(|| validate_text_answer(typed, &self.correct_answer, self.kind))
    }
}

/// Builds questions. Holds no state beyond its tuning.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    pub distractor_count: usize,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self { distractor_count: 3 }
    }
}

impl QuestionGenerator {
    /// Whether `word` (with `pool` as distractor source) has what `kind` needs.
    /// Multiple-choice types need a full set of distinct distractors.
    pub fn is_available(&self, word: &Word, kind: QuestionType, pool: &[Word]) -> bool {
        if kind.is_free_text() {
            return true;
        }
        let others = others(word, pool);
        DistractorPlan::for_kind(word, kind, &others)
            .is_some_and(|plan| plan.guaranteed() >= self.distractor_count)
    }

    /// Pick uniformly among the question types available for this word.
    pub fn generate_random<R: Rng + ?Sized>(&self, word: &Word, pool: &[Word], rng: &mut R) -> Question {
        let available: Vec<QuestionType> = QuestionType::ALL
            .into_iter()
            .filter(|&kind| self.is_available(word, kind, pool))
            .collect();
        let kind = available
            .choose(rng)
            .copied()
            .unwrap_or(QuestionType::DefinitionRecall);
        self.generate(word, kind, pool, rng)
    }

    /// Build a question of the requested type, falling back to definition
    /// recall when the word or pool lacks the data for it.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        word: &Word,
        kind: QuestionType,
        pool: &[Word],
        rng: &mut R,
    ) -> Question {
        let others = others(word, pool);
        let plan = DistractorPlan::for_kind(word, kind, &others)
            .filter(|plan| plan.guaranteed() >= self.distractor_count);
        let Some(plan) = plan else {
            return Question {
                word_id: word.id,
                kind: QuestionType::DefinitionRecall,
                prompt: format!("Define \"{}\".", word.term),
                options: Vec::new(),
                correct_answer: word.definition.clone(),
                hint: (!word.example_sentence.is_empty()).then(|| word.example_sentence.clone()),
            };
        };

        let (prompt, correct, hint) = match kind {
            QuestionType::SentenceCompletion => {
                let sentence = blank_out(&word.example_sentence, &word.term)
                    .unwrap_or_else(|| word.example_sentence.clone());
                (
                    format!("Complete the sentence: {sentence}"),
                    word.term.clone(),
                    Some(word.definition.clone()),
                )
            }
            QuestionType::SynonymSelection => (
                format!("Which word is a synonym of \"{}\"?", word.term),
                choose_or_first(&word.synonyms, rng),
                None,
            ),
            QuestionType::AntonymSelection => (
                format!("Which word is an antonym of \"{}\"?", word.term),
                choose_or_first(&word.antonyms, rng),
                None,
            ),
            QuestionType::DefinitionMatch => (
                format!("What does \"{}\" mean?", word.term),
                word.definition.clone(),
                None,
            ),
            QuestionType::WordFromDefinition | QuestionType::DefinitionRecall => (
                format!("Which word means: {}", word.definition),
                word.term.clone(),
                word.term.chars().next().map(|c| format!("Starts with \"{c}\"")),
            ),
        };

        let mut distractors = Distractors::new(&correct, self.distractor_count);
        distractors.exclude(&plan.excluded);
        for (candidates, limit) in plan.sources {
            distractors.add_from(candidates, limit, rng);
        }

        let mut choices: Vec<(String, bool)> = distractors
            .into_vec()
            .into_iter()
            .map(|text| (text, false))
            .collect();
        choices.push((correct.clone(), true));
        choices.shuffle(rng);

        Question {
            word_id: word.id,
            kind,
            prompt,
            options: choices
                .into_iter()
                .enumerate()
                .map(|(id, (text, is_correct))| AnswerOption { id, text, is_correct })
                .collect(),
            correct_answer: correct,
            hint,
        }
    }
}

/// Where a multiple-choice type draws its wrong answers from: texts that may
/// never be offered, then candidate groups drawn in order, each with a cap.
struct DistractorPlan {
    excluded: Vec<String>,
    sources: Vec<(Vec<String>, usize)>,
}

impl DistractorPlan {
    /// `None` for free-text types and when the word lacks the data `kind` needs.
    fn for_kind(word: &Word, kind: QuestionType, others: &[&Word]) -> Option<Self> {
        let plan = match kind {
            QuestionType::DefinitionRecall => return None,
            QuestionType::SentenceCompletion => {
                blank_out(&word.example_sentence, &word.term)?;
                let (same_pos, other_pos): (Vec<&Word>, Vec<&Word>) = others
                    .iter()
                    .copied()
                    .partition(|w| w.part_of_speech == word.part_of_speech);
                Self {
                    excluded: vec![word.term.clone()],
                    sources: vec![(terms(&same_pos), usize::MAX), (terms(&other_pos), usize::MAX)],
                }
            }
            QuestionType::SynonymSelection if !word.synonyms.is_empty() => Self {
                excluded: word.synonyms.clone(),
                sources: vec![(terms(others), usize::MAX)],
            },
            QuestionType::AntonymSelection if !word.antonyms.is_empty() => Self {
                excluded: word.antonyms.clone(),
                sources: vec![(word.synonyms.clone(), 2), (terms(others), usize::MAX)],
            },
            QuestionType::SynonymSelection | QuestionType::AntonymSelection => return None,
            QuestionType::DefinitionMatch => Self {
                excluded: vec![word.definition.clone()],
                sources: vec![(others.iter().map(|w| w.definition.clone()).collect(), usize::MAX)],
            },
            QuestionType::WordFromDefinition => Self {
                excluded: vec![word.term.clone()],
                sources: vec![(terms(others), usize::MAX)],
            },
        };
        Some(plan)
    }

    /// Distinct distractors a draw yields whatever order candidates come in.
    /// A capped group is assumed to spend its picks on texts that later
    /// groups would also have offered.
    fn guaranteed(&self) -> usize {
        let mut seen: HashSet<String> = self.excluded.iter().map(|t| normalize(t)).collect();
        let mut total = 0;
        for (index, (candidates, limit)) in self.sources.iter().enumerate() {
            let later: HashSet<String> = self.sources[index + 1..]
                .iter()
                .flat_map(|(texts, _)| distinct_keys(texts))
                .collect();
            let mut fresh: Vec<String> = distinct_keys(candidates)
                .into_iter()
                .filter(|k| !seen.contains(k))
                .collect();
            fresh.sort_by_key(|k| !later.contains(k));
            for key in fresh.into_iter().take(*limit) {
                seen.insert(key);
                total += 1;
            }
        }
        total
    }
}

/// Distinct wrong answers, never equal to the correct one or to anything
/// explicitly excluded.
struct Distractors {
    chosen: Vec<String>,
    excluded: Vec<String>,
    target: usize,
}

impl Distractors {
    fn new(correct: &str, target: usize) -> Self {
        Self {
            chosen: Vec::with_capacity(target),
            excluded: vec![normalize(correct)],
            target,
        }
    }

    fn exclude(&mut self, texts: &[String]) {
        self.excluded.extend(texts.iter().map(|t| normalize(t)));
    }

    /// Draw at most `limit` candidates at random until the target is reached.
    fn add_from<R: Rng + ?Sized>(&mut self, mut candidates: Vec<String>, limit: usize, rng: &mut R) {
        candidates.shuffle(rng);
        let mut taken = 0;
        for candidate in candidates {
            if self.chosen.len() >= self.target || taken >= limit {
                break;
            }
            let key = normalize(&candidate);
            if key.is_empty() || self.excluded.contains(&key) {
                continue;
            }
            self.excluded.push(key);
            self.chosen.push(candidate);
            taken += 1;
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.chosen
    }
}

fn distinct_keys(texts: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in texts.iter().map(|t| normalize(t)) {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn others<'a>(word: &Word, pool: &'a [Word]) -> Vec<&'a Word> {
    pool.iter().filter(|w| is_other(word, w)).collect()
}

fn is_other(word: &Word, candidate: &Word) -> bool {
    candidate.id != word.id && normalize(&candidate.term) != normalize(&word.term)
}

fn terms(words: &[&Word]) -> Vec<String> {
    words.iter().map(|w| w.term.clone()).collect()
}

fn choose_or_first<R: Rng + ?Sized>(items: &[String], rng: &mut R) -> String {
    items.choose(rng).cloned().unwrap_or_default()
}

/// Replace every case-insensitive occurrence of `term` with a blank.
/// Returns `None` if the term does not occur.
pub fn blank_out(sentence: &str, term: &str) -> Option<String> {
    let term_len = term.chars().count();
    if term_len == 0 {
        return None;
    }

    let mut out = String::with_capacity(sentence.len());
    let mut rest = sentence;
    let mut found = false;
    while let Some(c) = rest.chars().next() {
        if starts_with_ignore_case(rest, term) {
            out.push_str(BLANK);
            let skip: usize = rest.chars().take(term_len).map(char::len_utf8).sum();
            rest = &rest[skip..];
            found = true;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    found.then_some(out)
}

fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    let mut chars = haystack.chars();
    needle
        .chars()
        .all(|n| chars.next().is_some_and(|h| h.to_lowercase().eq(n.to_lowercase())))
}
