//! Persistence collaborator seam.
//!
//! The engine operates on in-memory snapshots; a [`WordStore`] is where the
//! caller keeps them between sessions.

use crate::error::{Result, StoreError};
use crate::session::SessionStats;
use crate::types::Word;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub trait WordStore: Send + Sync {
    /// Load the full word collection.
    fn load_words(&self) -> Result<Vec<Word>>;

    /// Load a single word.
    fn get_word(&self, id: Uuid) -> Result<Word>;

    /// Insert or replace a word.
    fn save_word(&self, word: &Word) -> Result<()>;

    /// Insert or replace many words.
    fn save_words(&self, words: &[Word]) -> Result<()> {
        words.iter().try_for_each(|w| self.save_word(w))
    }

    /// Record the statistics of a finished session.
    fn save_session_stats(&self, stats: &SessionStats) -> Result<()>;
}

impl<T: WordStore + ?Sized> WordStore for Arc<T> {
    fn load_words(&self) -> Result<Vec<Word>> {
        (**self).load_words()
    }

    fn get_word(&self, id: Uuid) -> Result<Word> {
        (**self).get_word(id)
    }

    fn save_word(&self, word: &Word) -> Result<()> {
        (**self).save_word(word)
    }

    fn save_words(&self, words: &[Word]) -> Result<()> {
        (**self).save_words(words)
    }

    fn save_session_stats(&self, stats: &SessionStats) -> Result<()> {
        (**self).save_session_stats(stats)
    }
}

/// Store that keeps everything in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: RwLock<Vec<Word>>,
    sessions: RwLock<Vec<SessionStats>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        Self {
            words: RwLock::new(words),
            sessions: RwLock::default(),
        }
    }

    /// Statistics of every session recorded so far.
    pub fn session_history(&self) -> Result<Vec<SessionStats>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))?;
        Ok(sessions.clone())
    }
}

impl WordStore for MemoryStore {
    fn load_words(&self) -> Result<Vec<Word>> {
        let words = self
            .words
            .read()
            .map_err(|_| StoreError::Unavailable("word lock poisoned".to_string()))?;
        Ok(words.clone())
    }

    fn get_word(&self, id: Uuid) -> Result<Word> {
        let words = self
            .words
            .read()
            .map_err(|_| StoreError::Unavailable("word lock poisoned".to_string()))?;
        words
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn save_word(&self, word: &Word) -> Result<()> {
        let mut words = self
            .words
            .write()
            .map_err(|_| StoreError::Write("word lock poisoned".to_string()))?;
        match words.iter_mut().find(|w| w.id == word.id) {
            Some(existing) => *existing = word.clone(),
            None => words.push(word.clone()),
        }
        Ok(())
    }

    fn save_session_stats(&self, stats: &SessionStats) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::Write("session lock poisoned".to_string()))?;
        sessions.push(stats.clone());
        Ok(())
    }
}
