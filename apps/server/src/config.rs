//! Server configuration from environment variables.

use anyhow::Context;
use std::path::PathBuf;
use std::str::FromStr;
use vocab_core::EngineSettings;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON array of words to import at startup.
    pub words_path: Option<PathBuf>,
    /// Fixed seed for reproducible shuffles.
    pub rng_seed: Option<u64>,
    pub engine: EngineSettings,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// Recognised variables:
    /// - HOST, PORT: listen address (default 0.0.0.0:3000)
    /// - WORDS_PATH: word list to import at startup
    /// - RNG_SEED: deterministic randomness
    /// - PREVIEW_COUNT, QUIZ_GOAL, TARGET_SCORE: session and score tuning
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = EngineSettings::default();
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT")?.unwrap_or(3000),
            words_path: std::env::var("WORDS_PATH").ok().map(PathBuf::from),
            rng_seed: parse_var("RNG_SEED")?,
            engine: EngineSettings {
                preview_count: parse_var("PREVIEW_COUNT")?.unwrap_or(defaults.preview_count),
                quiz_goal: parse_var("QUIZ_GOAL")?.unwrap_or(defaults.quiz_goal),
                target_score: parse_var("TARGET_SCORE")?.unwrap_or(defaults.target_score),
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: {value}")),
        Err(_) => Ok(None),
    }
}
