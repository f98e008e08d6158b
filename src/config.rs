//! Configuration struct and validation.
//!
//! Values are resolved with the precedence flag > environment variable >
//! `.arena.toml` > built-in default. clap already folds environment variables
//! into the flag values, so this module only has to layer the settings file and
//! the defaults underneath.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::api::client::{DEFAULT_BASE, DEFAULT_TIMEOUT};
use crate::api::types::Difficulty;
use crate::cli::{KeyArg, PlayArgs};
use crate::project::ArenaSettings;
use crate::strategy::Strategy;

pub const DEFAULT_MAX_ROUNDS: u32 = 5;
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Options driving an automated qualification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    pub difficulty: Difficulty,
    pub strategy: Strategy,
    pub max_rounds: u32,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            strategy: Strategy::Paper,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL.
    pub base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default API key from the settings file.
    key: Option<String>,
    /// Play defaults from the settings file, already validated.
    play: PlayOptions,
    /// Lobby poll interval from the settings file.
    interval_secs: u64,
}

impl Config {
    /// Build the config from global flags and the loaded settings file.
    pub fn from_args(
        base: Option<String>,
        timeout_secs: Option<u64>,
        settings: &ArenaSettings,
    ) -> Result<Self> {
        let base = base
            .or_else(|| settings.api.base.clone())
            .unwrap_or_else(|| DEFAULT_BASE.to_string());

        let timeout = match timeout_secs.or(settings.api.timeout_secs) {
            Some(0) => bail!("timeout must be at least 1 second"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let defaults = PlayOptions::default();
        let difficulty = match &settings.play.difficulty {
            Some(s) => Difficulty::parse(s)?,
            None => defaults.difficulty,
        };
        let strategy = match &settings.play.strategy {
            Some(s) => Strategy::parse(s)?,
            None => defaults.strategy,
        };
        let max_rounds = settings.play.max_rounds.unwrap_or(defaults.max_rounds);
        if max_rounds == 0 {
            bail!("[play] max_rounds must be at least 1");
        }

        let interval_secs = settings.lobby.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            bail!("[lobby] interval_secs must be at least 1");
        }

        Ok(Config {
            base,
            timeout,
            key: settings.api.key.clone().filter(|k| !k.is_empty()),
            play: PlayOptions {
                difficulty,
                strategy,
                max_rounds,
            },
            interval_secs,
        })
    }

    /// Resolve the API key for an authenticated command.
    pub fn api_key(&self, arg: &KeyArg) -> Result<String> {
        match arg.key.clone().filter(|k| !k.is_empty()).or_else(|| self.key.clone()) {
            Some(key) => Ok(key),
            None => bail!("missing API key: pass --key, set ARENA_KEY, or add [api] key to .arena.toml"),
        }
    }

    pub fn difficulty(&self, flag: Option<Difficulty>) -> Difficulty {
        flag.unwrap_or(self.play.difficulty)
    }

    pub fn strategy(&self, flag: Option<Strategy>) -> Strategy {
        flag.unwrap_or(self.play.strategy)
    }

    /// Resolve qualification options for `qual-auto` / `onboard`.
    pub fn play_options(&self, args: &PlayArgs) -> Result<PlayOptions> {
        let max_rounds = args.max_rounds.unwrap_or(self.play.max_rounds);
        if max_rounds == 0 {
            bail!("--max-rounds must be at least 1");
        }
        Ok(PlayOptions {
            difficulty: self.difficulty(args.difficulty),
            strategy: self.strategy(args.strategy),
            max_rounds,
        })
    }

    /// Resolve the lobby poll interval.
    pub fn interval(&self, flag: Option<u64>) -> Result<Duration> {
        match flag.unwrap_or(self.interval_secs) {
            0 => bail!("--interval must be at least 1 second"),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}
