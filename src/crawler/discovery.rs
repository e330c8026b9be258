//! Category and subcategory discovery
//!
//! Reads the top-level navigation menu, visits each category to reveal its
//! subcategory links, and returns every listing to crawl exactly once.

use crate::config::Config;
use crate::driver::{PageDriver, Wait};
use crate::products::NavigationTarget;
use crate::CatalogError;
use std::collections::HashSet;

/// Walks the two-level navigation tree of a catalog
pub struct LinkDiscoverer<'a> {
    config: &'a Config,
    wait: Wait,
}

impl<'a> LinkDiscoverer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            wait: Wait::from_config(&config.timing),
        }
    }

    /// Discovers every category and subcategory listing
    ///
    /// The driver must already show a page carrying the navigation menu.
    /// Only hrefs are kept, never element handles, since every category
    /// visit re-renders the page.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<NavigationTarget>)` - Targets in discovery order, without duplicates
    /// * `Err(CatalogError::DiscoveryTimeout)` - The menu never rendered
    pub async fn discover<D>(&self, driver: &mut D) -> Result<Vec<NavigationTarget>, CatalogError>
    where
        D: PageDriver + ?Sized,
    {
        let selectors = &self.config.selectors;

        let menu = match self.wait.presence_of_all(&*driver, &selectors.side_menu).await {
            Ok(menu) => menu,
            Err(e) if e.is_timeout() => {
                return Err(CatalogError::DiscoveryTimeout {
                    url: driver.current_url().unwrap_or_default(),
                    waited_ms: self.wait.timeout().as_millis() as u64,
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut top_level = Vec::with_capacity(menu.len());
        for anchor in &menu {
            if let Some(href) = driver.attribute(anchor, "href")? {
                top_level.push(href);
            }
        }
        tracing::debug!("Navigation menu lists {} categories", top_level.len());

        let mut found: Vec<String> = Vec::new();
        for url in top_level {
            found.push(url.clone());

            match driver.navigate(&url).await {
                Ok(()) => {}
                Err(e) if e.is_navigation() => {
                    tracing::warn!("Category {} could not be loaded: {}", url, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            match self
                .wait
                .presence_of_all(&*driver, &selectors.listing_item)
                .await
            {
                Ok(_) => {}
                Err(e) if e.is_timeout() => {
                    tracing::warn!("Category {} rendered no products: {}", url, e)
                }
                Err(e) => return Err(e.into()),
            }

            // Subcategory links only show up once inside a category
            let mut subcategories = 0;
            for anchor in driver.find_all(None, &selectors.subcategory)? {
                let Some(href) = driver.attribute(&anchor, "href")? else {
                    continue;
                };
                let target = NavigationTarget::new(href);
                if target.matches_marker(&self.config.catalog.path_marker) {
                    found.push(target.as_str().to_string());
                    subcategories += 1;
                }
            }
            tracing::debug!("{}: {} subcategory links", url, subcategories);
        }

        Ok(dedup_targets(found))
    }
}

/// Removes repeated URLs, keeping each one at its first position
pub fn dedup_targets<I>(urls: I) -> Vec<NavigationTarget>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .map(NavigationTarget::new)
        .collect()
}
