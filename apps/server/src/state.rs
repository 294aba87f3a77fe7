//! Shared application state.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use vocab_core::{Clock, DailySession, EngineSettings, MemoryStore};

/// The session type served over HTTP.
pub type ActiveSession = DailySession<Arc<MemoryStore>, StdRng>;

/// Mutable engine state. One user, at most one session at a time.
pub struct Engine {
    pub rng: StdRng,
    pub session: Option<ActiveSession>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<dyn Clock>,
    pub settings: Arc<EngineSettings>,
    pub engine: Arc<Mutex<Engine>>,
}

impl AppState {
    pub fn new(
        store: Arc<MemoryStore>,
        clock: Arc<dyn Clock>,
        settings: EngineSettings,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            clock,
            settings: Arc::new(settings),
            engine: Arc::new(Mutex::new(Engine { rng, session: None })),
        }
    }
}
