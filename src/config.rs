//! Table settings: built-in defaults, then an optional TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables.

use crate::moves::{Chips, MAX_TABLE_CHIPS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const MAX_SEATS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub max_players: usize,
    /// Deck shuffling seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            starting_stack: 1_000,
            max_players: MAX_SEATS,
            seed: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl TableConfig {
    /// Resolve from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());
        Self::resolve(file.as_deref().map(Path::new), |key| std::env::var(key).ok())
    }

    /// Resolve from an optional file and an environment lookup.
    pub fn resolve<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match file {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Some(v) = env_value(&env, "HOLDEM_SMALL_BLIND")? {
            cfg.small_blind = v;
        }
        if let Some(v) = env_value(&env, "HOLDEM_BIG_BLIND")? {
            cfg.big_blind = v;
        }
        if let Some(v) = env_value(&env, "HOLDEM_STARTING_STACK")? {
            cfg.starting_stack = v;
        }
        if let Some(v) = env_value(&env, "HOLDEM_SEED")? {
            cfg.seed = Some(v);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Unset keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be positive".into()));
        }
        if !(2..=MAX_SEATS).contains(&self.max_players) {
            return Err(ConfigError::Invalid(format!(
                "max_players must be between 2 and {MAX_SEATS}, got {}",
                self.max_players
            )));
        }
        let full_table = (self.max_players as Chips).checked_mul(self.starting_stack);
        if full_table.map_or(true, |total| total > MAX_TABLE_CHIPS) {
            return Err(ConfigError::Invalid(format!(
                "starting_stack {} times {} seats exceeds {MAX_TABLE_CHIPS} chips",
                self.starting_stack, self.max_players
            )));
        }
        Ok(())
    }
}

fn env_value<F, T>(env: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match env(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key}: cannot parse {raw:?}"))),
        None => Ok(None),
    }
}
