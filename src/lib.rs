//! Catalog-Crawler: a product crawler for hierarchical e-commerce catalogs
//!
//! This crate walks a catalog's two-level navigation menu, drains every
//! category listing page by page, extracts product records, normalizes their
//! numeric fields, and writes a flat CSV table plus a ranked text summary.

pub mod config;
pub mod crawler;
pub mod driver;
pub mod output;
pub mod products;
pub mod state;

use thiserror::Error;

/// Main error type for Catalog-Crawler operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation menu did not render at {url} within {waited_ms}ms")]
    DiscoveryTimeout { url: String, waited_ms: u64 },

    #[error("Page driver error: {0}")]
    Driver(#[from] driver::DriverError),

    #[error("Failed to extract '{field}' from listing item: {source}")]
    Extraction {
        field: &'static str,
        source: driver::DriverError,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Catalog-Crawler operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Orchestrator};
pub use driver::{DriverError, ElementHandle, HttpPageDriver, PageDriver};
pub use products::{NavigationTarget, NormalizedProduct, Parsed, RawProduct};
pub use state::{ListingEnd, ListingState};
