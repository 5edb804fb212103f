// Runtime configuration, loaded from environment variables.

use thiserror::Error;
use tracing::Level;

use crate::monster::MAX_LEVEL;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Where team scores come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Ask the authoritative backend first, use the local engine when it fails.
    RemoteWithFallback,
    /// Never contact the backend.
    LocalOnly,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scoring_mode: ScoringMode,
    /// Highest level monsters can be raised to (at most `MAX_LEVEL`).
    pub level_cap: u32,
    /// Levels granted to each team member when a challenge is won.
    pub challenge_reward: u32,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring_mode: ScoringMode::RemoteWithFallback,
            level_cap: MAX_LEVEL,
            challenge_reward: 1,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `MONSTER_SCORING_MODE` - `remote` (default) or `local`
    /// - `MONSTER_LEVEL_CAP` - 1 to 99 (default 99)
    /// - `MONSTER_CHALLENGE_REWARD` - levels per won challenge (default 1)
    /// - `MONSTER_LOG_LEVEL` - `trace`, `debug`, `info` (default), `warn` or `error`
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable lookup. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("MONSTER_SCORING_MODE") {
            config.scoring_mode = match value.trim().to_ascii_lowercase().as_str() {
                "remote" => ScoringMode::RemoteWithFallback,
                "local" => ScoringMode::LocalOnly,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "MONSTER_SCORING_MODE",
                        value,
                        reason: "expected `remote` or `local`",
                    })
                }
            };
        }

        if let Some(value) = lookup("MONSTER_LEVEL_CAP") {
            config.level_cap = match value.trim().parse::<u32>() {
                Ok(cap) if (1..=MAX_LEVEL).contains(&cap) => cap,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "MONSTER_LEVEL_CAP",
                        value,
                        reason: "expected a number from 1 to 99",
                    })
                }
            };
        }

        if let Some(value) = lookup("MONSTER_CHALLENGE_REWARD") {
            config.challenge_reward =
                value.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "MONSTER_CHALLENGE_REWARD",
                    value: value.clone(),
                    reason: "expected a non-negative number",
                })?;
        }

        if let Some(value) = lookup("MONSTER_LOG_LEVEL") {
            config.log_level = value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "MONSTER_LOG_LEVEL",
                value: value.clone(),
                reason: "expected trace, debug, info, warn or error",
            })?;
        }

        Ok(config)
    }

    /// Install the global fmt subscriber. Later calls are ignored.
    pub fn init_tracing(&self) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .try_init();
    }
}
