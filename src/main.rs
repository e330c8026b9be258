//! Catalog-Crawler main entry point
//!
//! This is the command-line interface for the Catalog-Crawler product crawler.

use anyhow::Context;
use catalog_crawler::config::{load_config_with_hash, validate, Config};
use catalog_crawler::crawler::run_crawl;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Crawler: a product crawler for hierarchical e-commerce catalogs
///
/// Catalog-Crawler discovers every category and subcategory of a catalog,
/// paginates through each listing, and writes a CSV product table plus a
/// ranked summary.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version)]
#[command(about = "A product crawler for hierarchical e-commerce catalogs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            let config = Config::default();
            validate(&config).context("Built-in configuration is invalid")?;
            tracing::info!("No configuration file given, using defaults");
            config
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Starting crawl at {}", config.catalog.root_url);
    run_crawl(config)
        .await
        .context("Failed to start the page driver")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Crawler Dry Run ===\n");

    println!("Catalog:");
    println!("  Root URL: {}", config.catalog.root_url);
    println!("  Path marker: {}", config.catalog.path_marker);

    println!("\nSelectors:");
    println!("  Side menu: {}", config.selectors.side_menu);
    println!("  Listing item: {}", config.selectors.listing_item);
    println!("  Subcategory: {}", config.selectors.subcategory);
    println!(
        "  Fields: {} / {} / {} / {}",
        config.selectors.title,
        config.selectors.price,
        config.selectors.rating,
        config.selectors.reviews
    );
    println!(
        "  Pagination: {} (next: {})",
        config.selectors.pagination, config.selectors.pagination_last
    );

    println!("\nTiming:");
    println!("  Element wait: {}ms", config.timing.element_wait_ms);
    println!("  Poll interval: {}ms", config.timing.poll_interval_ms);
    println!("  Page settle: {}ms", config.timing.page_settle_ms);
    println!("  Click retries: {}", config.timing.click_retries);

    println!("\nOutput:");
    println!(
        "  Table: {} (fallback: {})",
        config.output.table_path, config.output.table_fallback_path
    );
    println!("  Summary: {}", config.output.summary_path);
    println!("  Ranking size: {}", config.output.top_n);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\n✓ Configuration is valid");
}
