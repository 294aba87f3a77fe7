//! Builders shared by unit tests.

use crate::types::{LearningStage, NewWord, PartOfSpeech, Word};
use chrono::{DateTime, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
}

pub fn word(term: &str) -> Word {
    word_with_pos(term, PartOfSpeech::Adjective)
}

pub fn word_with_pos(term: &str, part_of_speech: PartOfSpeech) -> Word {
    NewWord {
        id: None,
        term: term.to_string(),
        definition: format!("the meaning of {term}"),
        part_of_speech,
        example_sentence: format!("Her reply was {term} and brief."),
        difficulty: Default::default(),
        frequency: 0,
        synonyms: vec![],
        antonyms: vec![],
        mnemonic: None,
    }
    .into_word()
}

pub fn word_at_stage(term: &str, stage: LearningStage) -> Word {
    let mut w = word(term);
    w.state.learning_stage = stage;
    w
}
