//! postwatch main entry point
//!
//! This is the command-line interface for the postwatch listing watcher.

use anyhow::Context;
use clap::Parser;
use postwatch::config::load_config;
use postwatch::crawler::run_watch;
use postwatch::report::SmtpNotifier;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// postwatch: an incremental keyword watcher for paginated listing sites
///
/// postwatch walks the configured listing site, tests each detail page
/// against the keyword filter, and mails a report when there is anything
/// it has not reported before. Run it periodically (e.g. from cron); the
/// per-keyword-set history file keeps repeat runs quiet.
#[derive(Parser, Debug)]
#[command(name = "postwatch")]
#[command(version = "1.0.0")]
#[command(about = "Watch a paginated listing site for keyword matches", long_about = None)]
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

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let notifier = SmtpNotifier::new(config.notify.clone());
    let outcome = run_watch(&config, &notifier).await?;

    if outcome.delivered {
        println!("New matches found. Email sent.");
    } else {
        println!("No new matches found.");
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
            0 => EnvFilter::new("postwatch=info,warn"),
            1 => EnvFilter::new("postwatch=debug,info"),
            2 => EnvFilter::new("postwatch=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &postwatch::Config) {
    println!("=== postwatch Dry Run ===\n");

    println!("Search:");
    println!("  Keywords: {:?}", config.search.keywords);
    println!("  Days to check: {}", config.search.days_to_check);

    println!("\nSite:");
    println!("  Listing URL: {}", config.site.listing_url);
    println!("  Base URL: {}", config.site.base_url);
    println!("  Detail path pattern: {}", config.site.detail_path_pattern);
    println!("  Title selector: {}", config.site.title_selector);
    println!("  Offset increment: {}", config.site.offset_increment);
    println!("  Fetch timeout: {}s", config.site.fetch_timeout_secs);

    println!("\nHistory:");
    println!("  File: {}", config.history_path().display());

    println!("\nNotify:");
    println!(
        "  SMTP: {}:{}",
        config.notify.smtp_host, config.notify.smtp_port
    );
    println!("  From: {}", config.notify.from_address);
    println!("  To: {}", config.notify.to_address);

    let ceiling =
        u64::from(config.site.offset_increment) * 2 * u64::from(config.search.days_to_check);
    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl up to offset {} per run", ceiling);
}
