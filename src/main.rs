//! vaultsummary - Vaultdoor archival usage for Pluto projects
//!
//! A CLI tool that lists the vaults known to a Vaultdoor server and reports
//! how many files and bytes a project holds in each of them.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, unreachable server, malformed response, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod vaultdoor;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{ReportMetadata, SummaryReport};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;
use vaultdoor::{BaseUrl, HttpTransport, TransportOptions, VaultdoorClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("vaultsummary v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(&args, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Vault summary failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .vaultsummary.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    println!("   Set [vaultdoor] url and token for your deployment.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref config_path) => Config::load(config_path)?,
        None => Config::load_default()?.unwrap_or_default(),
    };
    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

/// Dispatch to the requested mode.
async fn run(args: &Args, config: &Config) -> Result<()> {
    let base_url = BaseUrl::parse(&config.vaultdoor.url)?;
    let transport = HttpTransport::new(&TransportOptions {
        token: config.vaultdoor.token.clone(),
        timeout: config.vaultdoor.timeout(),
        use_system_proxy: config.vaultdoor.use_system_proxy,
    })?;
    let client = VaultdoorClient::new(transport, base_url);
    info!("Using Vaultdoor at {}", client.base_url());

    let output = if args.list_vaults {
        list_vaults(&client, args).await?
    } else {
        let project_id = args.project.as_deref().unwrap_or_default();
        match args.vault {
            Some(ref vault_id) => vault_detail(&client, args, config, project_id, vault_id).await?,
            None => project_summary(&client, args, config, project_id).await?,
        }
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                println!("✅ Report saved to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// --list-vaults: render the catalog.
async fn list_vaults(client: &VaultdoorClient, args: &Args) -> Result<String> {
    let vaults = client.list_vaults().await?;

    match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&vaults).context("Failed to serialize vault list")
        }
        OutputFormat::Markdown => Ok(report::generate_catalog_listing(&vaults)),
    }
}

/// --vault: category breakdown of one vault.
async fn vault_detail(
    client: &VaultdoorClient,
    args: &Args,
    config: &Config,
    project_id: &str,
    vault_id: &str,
) -> Result<String> {
    let summary = client.fetch_one_vault_summary(project_id, vault_id).await?;

    match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&summary).context("Failed to serialize vault summary")
        }
        OutputFormat::Markdown => Ok(report::generate_breakdown_report(
            project_id,
            vault_id,
            summary.as_ref(),
            config.display.size_format(),
        )),
    }
}

/// Default mode: one row per vault for the project.
async fn project_summary(
    client: &VaultdoorClient,
    args: &Args,
    config: &Config,
    project_id: &str,
) -> Result<String> {
    let start_time = Instant::now();

    let mut vaults = client.list_vaults().await?;
    if config.display.newest_first {
        vaults = analysis::newest_first(vaults);
    }

    let spinner = make_spinner(args.quiet, vaults.len());
    let fetched = client.fetch_all_vault_summaries(project_id, &vaults).await;
    spinner.finish_and_clear();
    let rows = match fetched {
        Ok(rows) => rows,
        Err(e) if e.is_transport() => {
            return Err(anyhow::Error::new(e)
                .context(format!("Cannot reach Vaultdoor at {}", client.base_url())))
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to load vault summaries")),
    };

    let summary_report = SummaryReport {
        metadata: ReportMetadata {
            vaultdoor_url: client.base_url().as_str().to_string(),
            project_id: project_id.to_string(),
            generated_at: Utc::now(),
            vault_count: vaults.len(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        totals: analysis::totals(&rows),
        rows,
    };

    match args.format {
        OutputFormat::Json => report::generate_json_report(&summary_report),
        OutputFormat::Markdown => Ok(report::generate_markdown_report(
            &summary_report,
            config.display.size_format(),
        )),
    }
}

/// Spinner shown while the per-vault requests are in flight.
fn make_spinner(quiet: bool, vault_count: usize) -> ProgressBar {
    if quiet || vault_count == 0 {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Querying {} vaults...", vault_count));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
