//! Common test utilities for the API integration tests.
//!
//! Every test gets its own in-memory store and a clock that only moves when
//! the test moves it, so due dates and shuffles are reproducible.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use vocab_core::{EngineSettings, FixedClock, MemoryStore, Word};
use vocab_server::AppState;

pub const SEED: u64 = 42;

/// Test context holding the shared store and clock behind a router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub state: AppState,
}

impl TestContext {
    /// Create a context with an empty word collection.
    pub fn new() -> Self {
        Self::with_words(Vec::new())
    }

    /// Create a context whose store already holds `words`.
    pub fn with_words(words: Vec<Word>) -> Self {
        Self::with_settings(words, EngineSettings::default())
    }

    pub fn with_settings(words: Vec<Word>, settings: EngineSettings) -> Self {
        let store = Arc::new(MemoryStore::with_words(words));
        let clock = Arc::new(FixedClock::new(start_time()));
        let state = AppState::new(store.clone(), clock.clone(), settings, Some(SEED));
        Self {
            store,
            clock,
            state,
        }
    }

    pub fn router(&self) -> Router {
        vocab_server::router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    pub fn now(&self) -> DateTime<Utc> {
        use vocab_core::Clock;
        self.clock.now()
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance(Duration::days(days));
    }
}

/// The instant every test starts at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 30, 0).unwrap()
}
