//! Configuration loading from TOML.
//!
//! Reads an optional `drawodds.toml` and deserializes it into strongly-typed
//! structs. Every field has a default, so a missing file or a partial
//! file is fine; a file that exists but does not parse is an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::simulator::DrawRules;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "drawodds.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub rules: DrawRules,
    pub deck: DeckConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeckConfig {
    /// Constructed deck size.
    pub base_size: u32,
    /// Cards a Trial takes out of the deck.
    pub trial_removes: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            base_size: 40,
            trial_removes: 1,
        }
    }
}

impl DeckConfig {
    /// Deck size at game start, with or without a Trial card.
    pub fn total_cards(&self, trial: bool) -> u32 {
        if trial {
            self.base_size.saturating_sub(self.trial_removes)
        } else {
            self.base_size
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        debug!(path, "Config loaded");
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.rules.validate()?;
        Ok(config)
    }
}
