//! Crawl orchestrator - main crawl sequencing logic
//!
//! This module ties the crawl together:
//! - Loading the catalog root and discovering listings
//! - Draining every listing into one product sequence
//! - Normalizing, persisting the table and writing the ranked summary
//! - Containing failures and always releasing the page driver

use crate::config::Config;
use crate::crawler::discovery::LinkDiscoverer;
use crate::crawler::paginator::{ListingOutcome, Paginator};
use crate::driver::PageDriver;
use crate::output::{report, write_summary, write_table, CrawlReport};
use crate::products::{normalize, NavigationTarget, RawProduct};
use crate::state::ListingEnd;
use crate::CatalogError;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// What a completed crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Number of listings visited
    pub targets: usize,

    /// Number of products extracted across all listings
    pub products: usize,

    /// Where the table was written, if anything was written
    pub table_path: Option<PathBuf>,

    /// Ranked summary, if there were products to rank
    pub report: Option<CrawlReport>,
}

/// Sequences a full crawl over one exclusively owned page driver
pub struct Orchestrator<D: PageDriver> {
    config: Config,
    driver: D,
}

impl<D: PageDriver> Orchestrator<D> {
    pub fn new(config: Config, driver: D) -> Self {
        Self { config, driver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Runs the crawl to completion
    ///
    /// Never fails: any error is logged once with its full cause chain, and
    /// the driver is released on every path.
    pub async fn run(&mut self) {
        let span = tracing::info_span!("crawl", root = %self.config.catalog.root_url);

        async {
            match self.execute().await {
                Ok(outcome) => tracing::info!(
                    "Crawl finished: {} products from {} listings",
                    outcome.products,
                    outcome.targets
                ),
                Err(e) => tracing::error!("Error during crawl: {}", error_chain(&e)),
            }

            if let Err(e) = self.driver.quit().await {
                tracing::warn!("Failed to release page driver: {}", e);
            }
        }
        .instrument(span)
        .await
    }

    /// Runs the crawl and reports what it produced
    ///
    /// Unlike [`run`](Self::run), errors are returned and the driver is left
    /// open.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Crawl completed, possibly with no products
    /// * `Err(CatalogError)` - Discovery timed out, or an unrecoverable error occurred
    pub async fn execute(&mut self) -> Result<CrawlOutcome, CatalogError> {
        let Self { config, driver } = self;

        driver.navigate(&config.catalog.root_url).await?;

        let targets = LinkDiscoverer::new(config).discover(driver).await?;
        tracing::info!("Found {} categories/subcategories", targets.len());

        let paginator = Paginator::new(config);
        let mut products: Vec<RawProduct> = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            let span = tracing::info_span!("target", index = index + 1, url = %target);
            let listing = crawl_target(driver, &paginator, target, index + 1, targets.len())
                .instrument(span)
                .await?;
            products.extend(listing.products);
        }

        tracing::info!("Total products extracted: {}", products.len());

        if products.is_empty() {
            tracing::warn!("No products were extracted, skipping output");
            return Ok(CrawlOutcome {
                targets: targets.len(),
                products: 0,
                table_path: None,
                report: None,
            });
        }

        let normalized = normalize(&products);

        let table_path = write_table(
            &normalized,
            Path::new(&config.output.table_path),
            Path::new(&config.output.table_fallback_path),
        )?;

        let report = report(&normalized, config.output.top_n);
        if let Some(report) = &report {
            let summary_path = Path::new(&config.output.summary_path);
            write_summary(report, summary_path)?;
            tracing::info!("Summary written to {}", summary_path.display());
        }

        Ok(CrawlOutcome {
            targets: targets.len(),
            products: products.len(),
            table_path: Some(table_path),
            report,
        })
    }
}

/// Loads one listing and drains it
async fn crawl_target<D>(
    driver: &mut D,
    paginator: &Paginator<'_>,
    target: &NavigationTarget,
    position: usize,
    total: usize,
) -> Result<ListingOutcome, CatalogError>
where
    D: PageDriver + ?Sized,
{
    tracing::info!("[{}/{}] Extracting: {}", position, total, target);

    let listing = match driver.navigate(target.as_str()).await {
        Ok(()) => paginator.collect(driver).await?,
        Err(e) if e.is_navigation() => {
            tracing::warn!("Listing {} could not be loaded: {}", target, e);
            ListingOutcome {
                products: Vec::new(),
                pages: 0,
                end: ListingEnd::NoItems,
            }
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "  -> {} products extracted from this listing ({} pages, {})",
        listing.products.len(),
        listing.pages,
        listing.end
    );
    if listing.end.is_early() && !listing.products.is_empty() {
        tracing::warn!("Listing {} may be incomplete ({})", target, listing.end);
    }

    Ok(listing)
}

/// Formats an error together with every underlying cause
pub fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": caused by: ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
