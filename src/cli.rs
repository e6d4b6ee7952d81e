//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::report::MAX_DECIMAL_PLACES;
use clap::Parser;
use std::path::PathBuf;

/// vaultsummary - archival usage of Pluto projects across Vaultdoor vaults
///
/// Lists the vaults Vaultdoor knows about and reports how many files and
/// bytes a project holds in each of them.
///
/// Examples:
///   vaultsummary --vaultdoor-url https://vaultdoor.example.com/ --project 123
///   vaultsummary --project 123 --format json --output summary.json
///   vaultsummary --project 123 --vault 5f3c-vault-id
///   vaultsummary --list-vaults
///   vaultsummary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Pluto project id to summarize
    #[arg(short, long, value_name = "ID")]
    pub project: Option<String>,

    /// Vaultdoor base URL
    ///
    /// Overrides the config file. A trailing '/' is added if missing.
    #[arg(long, value_name = "URL", env = "VAULTDOOR_URL")]
    pub vaultdoor_url: Option<String>,

    /// Bearer token for Vaultdoor requests
    #[arg(long, value_name = "TOKEN", env = "VAULTDOOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Show the category breakdown of a single vault instead of the summary table
    #[arg(long, value_name = "VAULT_ID")]
    pub vault: Option<String>,

    /// List the known vaults and exit
    #[arg(long, conflicts_with = "vault")]
    pub list_vaults: bool,

    /// Output format (markdown, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Use SI units (kB, MB) instead of binary units (KiB, MiB)
    #[arg(long)]
    pub si: bool,

    /// Decimal places for human-readable sizes
    #[arg(long, value_name = "N")]
    pub decimals: Option<usize>,

    /// Request timeout in seconds
    ///
    /// A request that times out fails the whole summary.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep the catalog order instead of showing the newest vault first
    #[arg(long)]
    pub catalog_order: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .vaultsummary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .vaultsummary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if !self.list_vaults {
            match self.project.as_deref() {
                None => return Err("--project is required unless --list-vaults is given".to_string()),
                Some(p) if p.trim().is_empty() => {
                    return Err("Project id must not be empty".to_string())
                }
                _ => {}
            }
        }

        if let Some(ref url) = self.vaultdoor_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Vaultdoor URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref vault) = self.vault {
            if vault.trim().is_empty() {
                return Err("Vault id must not be empty".to_string());
            }
        }

        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMAL_PLACES {
                return Err(format!("Decimals must be at most {}", MAX_DECIMAL_PLACES));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
