//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section is optional; anything left out falls back to the defaults below.
//! Game rules (target bounds, house edge, history cap, starting balance)
//! are fixed in code and cannot be configured.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::session::BetSlip;
use crate::types::{Direction, TARGET_MAX, TARGET_MIN};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub rng: RngConfig,
    pub shell: ShellConfig,
    pub dashboard: DashboardConfig,
}

/// Starting bet slip.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub default_bet: u64,
    pub default_target: u8,
    pub default_direction: Direction,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let slip = BetSlip::default();
        Self {
            default_bet: slip.bet_amount,
            default_target: slip.target,
            default_direction: slip.direction,
        }
    }
}

impl SessionConfig {
    pub fn slip(&self) -> BetSlip {
        BetSlip {
            bet_amount: self.default_bet,
            target: self.default_target,
            direction: self.default_direction,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for replayable sessions. Unset means OS entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ShellConfig {
    /// Pause between starting a roll and revealing it.
    pub reveal_delay_ms: u64,
    pub start_muted: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1000,
            start_muted: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let target = self.session.default_target;
        if !(TARGET_MIN..=TARGET_MAX).contains(&target) {
            bail!("session.default_target must be {TARGET_MIN}-{TARGET_MAX}, got {target}");
        }
        if self.dashboard.enabled && self.dashboard.port == 0 {
            bail!("dashboard.port must be non-zero when the dashboard is enabled");
        }
        Ok(())
    }
}
