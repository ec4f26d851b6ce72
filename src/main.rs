//! Fragment-Scout main entry point
//!
//! This is the command-line interface for the Fragment-Scout username checker.

use anyhow::Context;
use clap::Parser;
use fragment_scout::checker::{build_http_client, check_usernames};
use fragment_scout::config::{load_config_with_hash, Config};
use fragment_scout::server::serve;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Fragment-Scout: a batch username status checker
///
/// Fragment-Scout checks the marketplace status of Telegram-style usernames
/// by fetching their Fragment listing pages concurrently and classifying the
/// returned markup. It runs as an HTTP API by default, or as a one-shot
/// command-line check.
#[derive(Parser, Debug)]
#[command(name = "fragment-scout")]
#[command(version = "1.0.0")]
#[command(about = "A batch username status checker", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Check a comma-separated list of usernames and exit
    #[arg(long, value_name = "USERNAMES", conflicts_with = "dry_run")]
    check: Option<String>,

    /// Validate config and show what would be used without any network calls
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(usernames) = cli.check {
        handle_check(config, &usernames).await?;
    } else {
        handle_serve(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fragment_scout=info,warn"),
            1 => EnvFilter::new("fragment_scout=debug,info"),
            2 => EnvFilter::new("fragment_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be used
fn handle_dry_run(config: &Config) {
    println!("=== Fragment-Scout Dry Run ===\n");

    println!("Checker Configuration:");
    println!("  Concurrency: {}", config.checker.concurrency);
    println!(
        "  Request timeout: {}s",
        config.checker.request_timeout_secs
    );
    println!("  Max batch size: {}", config.checker.max_batch_size);

    println!("\nMarketplace:");
    println!("  Base URL: {}", config.marketplace.base_url);
    println!("  Layout: {:?}", config.marketplace.layout);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header);

    println!("\nServer:");
    println!("  Bind: {}:{}", config.server.bind_addr, config.server.port);

    println!("\n✓ Configuration is valid");
}

/// Handles the --check mode: one-shot batch check printed to stdout
async fn handle_check(config: Config, usernames: &str) -> anyhow::Result<()> {
    let usernames: Vec<String> = usernames
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if usernames.is_empty() {
        anyhow::bail!("no usernames provided to --check");
    }

    let timeout = Duration::from_secs(config.checker.request_timeout_secs);
    let client = build_http_client(&config.user_agent, timeout)
        .context("failed to build HTTP client")?;

    let results = check_usernames(&client, &config, &usernames).await;

    // Stable output order for scripting
    let mut lines: Vec<_> = results.into_iter().collect();
    lines.sort_by(|a, b| a.0.cmp(&b.0));
    for (username, status) in lines {
        println!("{}\t{}", username, status);
    }

    Ok(())
}

/// Handles the default mode: run the API server
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting API server (marketplace: {}, layout: {:?})",
        config.marketplace.base_url,
        config.marketplace.layout
    );

    serve(config).await.context("API server failed")?;
    Ok(())
}
