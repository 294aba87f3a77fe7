//! Factory functions for test words and request bodies.

use serde_json::json;
use vocab_core::{LearningStage, NewWord, PartOfSpeech, Word};

/// A complete word as a bulk import would supply it.
pub fn new_word(term: &str) -> NewWord {
    NewWord {
        id: None,
        term: term.to_string(),
        definition: format!("the meaning of {term}"),
        part_of_speech: PartOfSpeech::Adjective,
        example_sentence: format!("The answer was {term} to everyone present."),
        difficulty: Default::default(),
        frequency: 10,
        synonyms: vec![format!("{term}-like")],
        antonyms: vec![format!("un{term}")],
        mnemonic: None,
    }
}

/// A fresh word with learning state.
pub fn word(term: &str) -> Word {
    new_word(term).into_word()
}

/// A word that has already reached `stage`.
pub fn word_at_stage(term: &str, stage: LearningStage) -> Word {
    let mut word = word(term);
    word.state.learning_stage = stage;
    word
}

/// A word that has failed enough quizzes to need a deep moment.
pub fn struggling_word(term: &str) -> Word {
    let mut word = word_at_stage(term, LearningStage::Previewed);
    word.state.times_quiz_failed = 2;
    word
}

/// Create an import request body.
pub fn import_request(words: &[NewWord]) -> serde_json::Value {
    json!({ "words": words })
}

/// Create a review request body for a binary swipe.
pub fn swipe_request(word: &Word, knew_it: bool) -> serde_json::Value {
    json!({ "word_id": word.id, "knew_it": knew_it })
}

/// Create a review request body with an explicit 0-5 quality.
pub fn quality_request(word: &Word, quality: u8) -> serde_json::Value {
    json!({ "word_id": word.id, "quality": quality })
}

/// The answer body that is correct for a quiz question JSON value.
pub fn correct_answer(question: &serde_json::Value) -> serde_json::Value {
    match question["options"].as_array() {
        Some(options) if !options.is_empty() => {
            let id = options
                .iter()
                .find(|o| o["is_correct"].as_bool() == Some(true))
                .map(|o| o["id"].clone())
                .unwrap();
            json!({ "option_id": id })
        }
        _ => json!({ "text": question["correct_answer"] }),
    }
}

/// An answer body that is wrong for a quiz question JSON value.
pub fn wrong_answer(question: &serde_json::Value) -> serde_json::Value {
    match question["options"].as_array() {
        Some(options) if !options.is_empty() => {
            let id = options
                .iter()
                .find(|o| o["is_correct"].as_bool() == Some(false))
                .map(|o| o["id"].clone())
                .unwrap();
            json!({ "option_id": id })
        }
        _ => json!({ "text": "zzz" }),
    }
}
