//! Configuration for recsync.
//!
//! Policy constants for drift correction, the resolver fast path and chat
//! auto-scroll. Stored as TOML at `<config dir>/recsync/config.toml`; a
//! missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::scroll::ScrollEdge;

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "recsync";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub resolver: ResolverConfig,
    pub scroll: ScrollConfig,
}

/// Drift correction policy between the master and secondary players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Largest |secondary - master| (seconds) left uncorrected
    pub tolerance_seconds: f64,
    /// Master-clock seconds between two routine corrections (seeks ignore this).
    /// Anything above zero lets drift exceed the tolerance until it elapses.
    pub min_correction_interval: f64,
    /// Mirror play/pause/rate changes of the master onto the secondary
    pub propagate_transport: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: 0.5,
            min_correction_interval: 0.0,
            propagate_transport: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Largest forward jump (seconds) answered by scanning instead of binary search
    pub max_forward_step: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_forward_step: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Keep the current chat message in view
    pub auto_scroll: bool,
    /// Container edge the current message is aligned to
    pub edge: ScrollEdge,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            edge: ScrollEdge::Bottom,
        }
    }
}

impl Config {
    /// Path of the user config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the user config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constants that would make the policies meaningless.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("sync.tolerance_seconds", self.sync.tolerance_seconds)?;
        check_non_negative(
            "sync.min_correction_interval",
            self.sync.min_correction_interval,
        )?;
        check_non_negative("resolver.max_forward_step", self.resolver.max_forward_step)?;
        Ok(())
    }

    /// Serialize as pretty TOML (used by `recsync config show`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{} must be a non-negative number (got {})", field, value);
    }
    Ok(())
}
