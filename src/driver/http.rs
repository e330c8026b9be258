//! HTTP-backed page driver
//!
//! Renders a page by fetching it with a GET request and holding the markup as
//! a [`DomSnapshot`]. Clicking an anchor follows its `href`. This covers
//! catalogs whose listings and pagination are served as plain HTML.

use super::{DomSnapshot, DriverError, ElementHandle, PageDriver};
use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::UserAgentConfig;
/// use catalog_crawler::driver::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page driver that renders pages over HTTP
pub struct HttpPageDriver {
    client: Client,
    page: Option<DomSnapshot>,
    generation: u64,
}

impl HttpPageDriver {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            page: None,
            generation: 0,
        }
    }

    /// Creates a driver with a client identified by `config`
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    fn page(&self) -> Result<&DomSnapshot, DriverError> {
        self.page.as_ref().ok_or(DriverError::NoPage)
    }
}

#[async_trait]
impl PageDriver for HttpPageDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let target = Url::parse(url).map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("GET {}", target);

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|source| DriverError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| DriverError::Http {
            url: url.to_string(),
            source,
        })?;

        self.generation += 1;
        self.page = Some(DomSnapshot::new(final_url, body, self.generation));
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.page.as_ref().map(|page| page.url().to_string())
    }

    fn find_all(
        &self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        self.page()?.find_all(scope, selector)
    }

    fn text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        self.page()?.text(element)
    }

    fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.page()?.attribute(element, name)
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<(), DriverError> {
        let target = self.page()?.link_target(element)?;
        self.navigate(target.as_str())
            .await
            .map_err(DriverError::into_click_failure)
    }

    fn is_stale(&self, element: &ElementHandle) -> bool {
        match &self.page {
            Some(page) => page.is_stale(element),
            None => true,
        }
    }

    async fn quit(&mut self) -> Result<(), DriverError> {
        self.page = None;
        self.generation += 1;
        tracing::debug!("HTTP page driver released");
        Ok(())
    }
}
