//! Crawler module for catalog traversal
//!
//! This module contains the core crawling logic, including:
//! - Navigation menu discovery with deduplication
//! - Listing pagination with click recovery
//! - Per-item field extraction
//! - Overall crawl orchestration

mod discovery;
mod extractor;
mod orchestrator;
mod paginator;

pub use discovery::{dedup_targets, LinkDiscoverer};
pub use extractor::extract_product;
pub use orchestrator::{error_chain, CrawlOutcome, Orchestrator};
pub use paginator::{ListingOutcome, Paginator};

use crate::config::Config;
use crate::driver::HttpPageDriver;
use crate::CatalogError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open an HTTP page driver
/// 2. Load the catalog root and discover listings
/// 3. Drain every listing into one product sequence
/// 4. Normalize and write the product table
/// 5. Rank products and write the summary
/// 6. Release the driver
///
/// Failures during the crawl are logged, not returned; only a driver that
/// cannot be built is an error here.
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::Config;
/// use catalog_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// run_crawl(Config::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<(), CatalogError> {
    let driver = HttpPageDriver::from_config(&config.user_agent)?;
    let mut orchestrator = Orchestrator::new(config, driver);
    orchestrator.run().await;
    Ok(())
}
