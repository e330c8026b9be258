use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Catalog-Crawler
///
/// Every section and key has a default, so an empty file (or no file at all)
/// crawls the public webscraper.io test catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub selectors: SelectorConfig,
    pub timing: TimingConfig,
    pub output: OutputConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Where the catalog lives and how its listing URLs are recognised
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Catalog entry page holding the navigation menu
    pub root_url: String,

    /// Substring every subcategory URL must contain to be crawled
    pub path_marker: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_url: "https://webscraper.io/test-sites/e-commerce/allinone".to_string(),
            path_marker: "allinone".to_string(),
        }
    }
}

/// CSS selectors describing the catalog's page structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Top-level category anchors in the side menu
    pub side_menu: String,

    /// One product card in a listing
    pub listing_item: String,

    /// Subcategory/category anchors visible once inside a category
    pub subcategory: String,

    /// Product name, relative to a listing item
    pub title: String,

    /// Product price, relative to a listing item
    pub price: String,

    /// Element carrying the `data-rating` attribute, relative to a listing item
    pub rating: String,

    /// Review count, relative to a listing item
    pub reviews: String,

    /// Pagination container
    pub pagination: String,

    /// Last entry of the pagination control ("next")
    pub pagination_last: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            side_menu: "#side-menu a".to_string(),
            listing_item: ".thumbnail".to_string(),
            subcategory: ".subcategory-link, .category-link".to_string(),
            title: ".title".to_string(),
            price: ".price".to_string(),
            rating: "p[data-rating]".to_string(),
            reviews: ".review-count".to_string(),
            pagination: "ul.pagination".to_string(),
            pagination_last: "ul.pagination li:last-child".to_string(),
        }
    }
}

/// Wait budgets and retry limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimingConfig {
    /// Maximum time to wait for an element to render (milliseconds)
    pub element_wait_ms: u64,

    /// Delay between two polls of the rendered page (milliseconds)
    pub poll_interval_ms: u64,

    /// Pause after a pagination click before looking for new items (milliseconds)
    pub page_settle_ms: u64,

    /// Attempts to activate the "next" control before giving up on a listing
    pub click_retries: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            element_wait_ms: 10_000,
            poll_interval_ms: 250,
            page_settle_ms: 2_000,
            click_retries: 3,
        }
    }
}

impl TimingConfig {
    pub fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV product table
    pub table_path: String,

    /// Alternate table path used when the primary one cannot be written
    pub table_fallback_path: String,

    /// Path to the text summary
    pub summary_path: String,

    /// Number of products kept in the ranking
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: "products.csv".to_string(),
            table_fallback_path: "products_output.csv".to_string(),
            summary_path: "analysis.txt".to_string(),
            top_n: 3,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CatalogCrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://webscraper.io/test-sites".to_string(),
        }
    }
}
