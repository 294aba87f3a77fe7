//! Deep-moment remediation questions for struggling words.
//!
//! The learner picks the right explanation of the word out of four. Wrong
//! explanations are synthesised: the first antonym phrased as a synonym, then
//! canned descriptions that fit the wrong part of speech.

use crate::question::AnswerOption;
use crate::types::{PartOfSpeech, Word};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const WRONG_OPTIONS: usize = 3;

const FILLER: &str = "A technical term used only in legal documents";

fn wrong_descriptions(part_of_speech: PartOfSpeech) -> [&'static str; 2] {
    match part_of_speech {
        PartOfSpeech::Noun => [
            "To act quickly without thinking about the consequences",
            "Describing something that happens slowly over a long time",
        ],
        PartOfSpeech::Verb => [
            "A person who is known for being stubborn",
            "A feeling of calm satisfaction after finishing a task",
        ],
        PartOfSpeech::Adjective => [
            "To gather things together into a single place",
            "A formal meeting held to settle a disagreement",
        ],
        PartOfSpeech::Adverb => [
            "A place where people go to rest and recover",
            "To deliberately avoid answering a question",
        ],
        PartOfSpeech::Other => [
            "A word describing a type of formal agreement",
            "Relating to a gradual change in the weather",
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepMomentQuestion {
    pub word_id: Uuid,
    pub term: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    /// The full explanation, shown after answering.
    pub explanation: String,
}

impl DeepMomentQuestion {
    pub fn is_correct(&self, option_id: usize) -> bool {
        self.options
            .iter()
            .any(|o| o.id == option_id && o.is_correct)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeepRemediationGenerator;

impl DeepRemediationGenerator {
    pub fn generate<R: Rng + ?Sized>(&self, word: &Word, rng: &mut R) -> DeepMomentQuestion {
        let explanation = match &word.mnemonic {
            Some(mnemonic) => format!("{}. Memory tip: {}", word.definition.trim_end_matches('.'), mnemonic),
            None => word.definition.clone(),
        };

        let mut wrong: Vec<String> = Vec::with_capacity(WRONG_OPTIONS);
        if let Some(antonym) = word.antonyms.first() {
            wrong.push(format!("Similar in meaning to \"{antonym}\""));
        }
        for description in wrong_descriptions(word.part_of_speech) {
            if wrong.len() >= WRONG_OPTIONS {
                break;
            }
            wrong.push(description.to_string());
        }
        while wrong.len() < WRONG_OPTIONS {
            wrong.push(FILLER.to_string());
        }

        let mut choices: Vec<(String, bool)> = wrong.into_iter().map(|text| (text, false)).collect();
        choices.push((explanation.clone(), true));
        choices.shuffle(rng);

        DeepMomentQuestion {
            word_id: word.id,
            term: word.term.clone(),
            prompt: format!("Which explanation best fits \"{}\"?", word.term),
            options: choices
                .into_iter()
                .enumerate()
                .map(|(id, (text, is_correct))| AnswerOption { id, text, is_correct })
                .collect(),
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{word, word_with_pos};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wrong_texts(question: &DeepMomentQuestion) -> Vec<String> {
        question
            .options
            .iter()
            .filter(|o| !o.is_correct)
            .map(|o| o.text.clone())
            .collect()
    }

    #[test]
    fn antonym_becomes_first_wrong_explanation() {
        let mut target = word_with_pos("obscure", PartOfSpeech::Adjective);
        target.antonyms = vec!["clear".to_string(), "famous".to_string()];
        let question = DeepRemediationGenerator.generate(&target, &mut StdRng::seed_from_u64(7));

        assert_eq!(question.options.len(), 4);
        let wrong = wrong_texts(&question);
        assert!(wrong.contains(&"Similar in meaning to \"clear\"".to_string()));
        assert!(wrong.contains(&wrong_descriptions(PartOfSpeech::Adjective)[0].to_string()));
        assert!(!wrong.contains(&FILLER.to_string()));
    }

    #[test]
    fn pads_with_filler_without_antonyms() {
        let target = word_with_pos("vex", PartOfSpeech::Verb);
        let question = DeepRemediationGenerator.generate(&target, &mut StdRng::seed_from_u64(7));
        let mut wrong = wrong_texts(&question);
        wrong.sort();
        let mut expected = vec![
            wrong_descriptions(PartOfSpeech::Verb)[0].to_string(),
            wrong_descriptions(PartOfSpeech::Verb)[1].to_string(),
            FILLER.to_string(),
        ];
        expected.sort();
        assert_eq!(wrong, expected);
    }

    #[test]
    fn correct_option_includes_mnemonic() {
        let mut target = word("laconic");
        target.mnemonic = Some("Spartans of Laconia spoke little".to_string());
        let question = DeepRemediationGenerator.generate(&target, &mut StdRng::seed_from_u64(1));

        let correct: Vec<&AnswerOption> = question.options.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(
            correct[0].text,
            "the meaning of laconic. Memory tip: Spartans of Laconia spoke little"
        );
        assert!(question.is_correct(correct[0].id));
    }
}
