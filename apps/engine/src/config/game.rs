//! Engine limits loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::EngineError;

/// Tunable limits for every party the engine runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Turn length used when a party does not pick its own.
    pub default_timer_seconds: u64,
    pub min_players: usize,
    pub max_players: usize,
    /// Interval between countdown progress notifications.
    pub timer_update_interval: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_timer_seconds: 30,
            min_players: 2,
            max_players: 10,
            timer_update_interval: 3,
        }
    }
}

impl GameConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Recognized variables: `DEFAULT_TIMER_SECONDS`, `MIN_PLAYERS`,
    /// `MAX_PLAYERS`, `TIMER_UPDATE_INTERVAL`.
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();
        let config = Self {
            default_timer_seconds: env_u64("DEFAULT_TIMER_SECONDS", defaults.default_timer_seconds)?,
            min_players: env_usize("MIN_PLAYERS", defaults.min_players)?,
            max_players: env_usize("MAX_PLAYERS", defaults.max_players)?,
            timer_update_interval: env_u64("TIMER_UPDATE_INTERVAL", defaults.timer_update_interval)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_players < 2 {
            return Err(EngineError::config("MIN_PLAYERS must be at least 2"));
        }
        if self.max_players < self.min_players {
            return Err(EngineError::config(format!(
                "MAX_PLAYERS ({}) must be >= MIN_PLAYERS ({})",
                self.max_players, self.min_players
            )));
        }
        if self.default_timer_seconds == 0 {
            return Err(EngineError::config("DEFAULT_TIMER_SECONDS must be non-zero"));
        }
        if self.timer_update_interval == 0 {
            return Err(EngineError::config("TIMER_UPDATE_INTERVAL must be non-zero"));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.timer_update_interval)
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64, EngineError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| EngineError::config(format!("{name} must be an integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

fn env_usize(name: &str, default: usize) -> Result<usize, EngineError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| EngineError::config(format!("{name} must be an integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
