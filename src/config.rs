//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.vaultsummary.toml` files. Configuration is read once at startup and
//! not modified afterwards.

use crate::report::{SizeFormat, MAX_DECIMAL_PLACES};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".vaultsummary.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Vaultdoor connection settings.
    #[serde(default)]
    pub vaultdoor: VaultdoorConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Vaultdoor connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultdoorConfig {
    /// Base URL of the Vaultdoor service.
    #[serde(default = "default_url")]
    pub url: String,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Honour HTTP(S)_PROXY from the environment.
    #[serde(default = "default_true")]
    pub use_system_proxy: bool,
}

impl Default for VaultdoorConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
            timeout_seconds: default_timeout(),
            use_system_proxy: true,
        }
    }
}

impl VaultdoorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_url() -> String {
    "http://localhost:9000/".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use SI units (kB, MB) instead of binary units (KiB, MiB).
    #[serde(default)]
    pub si_units: bool,

    /// Decimal places for human-readable sizes.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,

    /// Show the most recently added vault first.
    #[serde(default = "default_true")]
    pub newest_first: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            si_units: false,
            decimal_places: default_decimal_places(),
            newest_first: true,
        }
    }
}

impl DisplayConfig {
    pub fn size_format(&self) -> SizeFormat {
        SizeFormat {
            si: self.si_units,
            decimal_places: self.decimal_places,
        }
    }
}

fn default_decimal_places() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.vaultsummary.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.vaultdoor_url {
            self.vaultdoor.url = url.clone();
        }
        if let Some(ref token) = args.token {
            self.vaultdoor.token = Some(token.clone());
        }
        if let Some(timeout) = args.timeout {
            self.vaultdoor.timeout_seconds = timeout;
        }

        if args.si {
            self.display.si_units = true;
        }
        if let Some(decimals) = args.decimals {
            self.display.decimal_places = decimals;
        }
        if args.catalog_order {
            self.display.newest_first = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check limits that the CLI enforces on its own flags.
    ///
    /// Run after [`Config::merge_with_args`] so file values get the same checks.
    pub fn validate(&self) -> Result<()> {
        if self.vaultdoor.timeout_seconds == 0 {
            bail!("[vaultdoor] timeout_seconds must be at least 1");
        }
        if self.display.decimal_places > MAX_DECIMAL_PLACES {
            bail!(
                "[display] decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES,
                self.display.decimal_places
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
