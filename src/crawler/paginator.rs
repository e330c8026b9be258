//! Listing pagination
//!
//! Drains one category listing page by page. The paginator alternates between
//! two states:
//! - `Loading`: wait for product cards to render
//! - `Draining`: extract every card, then try to activate the "next" control
//!
//! A listing ends when there is no pagination, the last entry is disabled,
//! items fail to render, or the "next" control keeps failing to activate.

use crate::config::{Config, SelectorConfig};
use crate::crawler::extractor::extract_product;
use crate::driver::{DriverError, ElementHandle, PageDriver, Wait};
use crate::products::RawProduct;
use crate::state::{ListingEnd, ListingState};
use crate::CatalogError;
use std::time::Duration;
use tokio::time::sleep;

/// Class marking a pagination entry as inactive
const DISABLED_CLASS: &str = "disabled";

/// Products collected from one listing and why collection stopped
#[derive(Debug, Clone)]
pub struct ListingOutcome {
    pub products: Vec<RawProduct>,
    pub pages: usize,
    pub end: ListingEnd,
}

/// Result of trying to move to the next page
enum Advance {
    Next,
    Finished(ListingEnd),
}

/// Drives a listing through all of its pages
pub struct Paginator<'a> {
    selectors: &'a SelectorConfig,
    wait: Wait,
    page_settle: Duration,
    click_retries: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            selectors: &config.selectors,
            wait: Wait::from_config(&config.timing),
            page_settle: config.timing.page_settle(),
            click_retries: config.timing.click_retries,
        }
    }

    /// Collects every product of the listing currently loaded in `driver`
    ///
    /// Timeouts and exhausted click retries end the listing early with what
    /// was already collected. Extraction failures and other driver errors
    /// propagate.
    ///
    /// # Returns
    ///
    /// * `Ok(ListingOutcome)` - Products in page order plus the end reason
    /// * `Err(CatalogError)` - An item could not be read or the driver failed
    pub async fn collect<D>(&self, driver: &mut D) -> Result<ListingOutcome, CatalogError>
    where
        D: PageDriver + ?Sized,
    {
        let mut products = Vec::new();
        let mut pages = 0;
        let mut state = ListingState::Loading;

        loop {
            tracing::trace!(%state, pages, "listing state");

            match state {
                ListingState::Loading => {
                    match self
                        .wait
                        .presence_of_all(&*driver, &self.selectors.listing_item)
                        .await
                    {
                        Ok(_) => state = ListingState::Draining,
                        Err(e) if e.is_timeout() => {
                            let end = if pages == 0 {
                                tracing::warn!("No products found on the page");
                                ListingEnd::NoItems
                            } else {
                                tracing::warn!(
                                    "Timed out waiting for new products after pagination"
                                );
                                ListingEnd::ReloadTimeout
                            };
                            return Ok(ListingOutcome {
                                products,
                                pages,
                                end,
                            });
                        }
                        Err(e) => return Err(e.into()),
                    }
                }

                ListingState::Draining => {
                    pages += 1;
                    let items = driver.find_all(None, &self.selectors.listing_item)?;
                    for item in &items {
                        products.push(extract_product(&*driver, item, self.selectors)?);
                    }
                    tracing::debug!("Page {}: {} products", pages, items.len());

                    match self.advance(driver).await? {
                        Advance::Finished(end) => {
                            return Ok(ListingOutcome {
                                products,
                                pages,
                                end,
                            })
                        }
                        Advance::Next => {
                            sleep(self.page_settle).await;
                            state = ListingState::Loading;
                        }
                    }
                }
            }
        }
    }

    /// Activates the "next" control, retrying transient click failures
    ///
    /// Items are never re-extracted here; a retry re-probes the control on
    /// the same page.
    async fn advance<D>(&self, driver: &mut D) -> Result<Advance, CatalogError>
    where
        D: PageDriver + ?Sized,
    {
        let mut attempts = 0;

        loop {
            let next = match self.next_control(&*driver)? {
                Some(next) => next,
                None if attempts == 0 && !self.has_pagination(&*driver)? => {
                    return Ok(Advance::Finished(ListingEnd::SinglePage))
                }
                None => return Ok(Advance::Finished(ListingEnd::LastPage)),
            };

            attempts += 1;
            let error = match driver.click(&next).await {
                Ok(()) => return Ok(Advance::Next),
                Err(e) if e.is_transient_click() => e,
                Err(e) => return Err(e.into()),
            };

            tracing::warn!(
                "Failed to click next-page control (attempt {}/{}): {}",
                attempts,
                self.click_retries,
                error
            );

            if attempts >= self.click_retries {
                tracing::warn!(
                    "Giving up on listing after {} failed next-page clicks",
                    attempts
                );
                return Ok(Advance::Finished(ListingEnd::ClickRetriesExhausted));
            }

            match self.wait.staleness_of(&*driver, &next).await {
                Ok(()) => {}
                Err(e) if e.is_timeout() => {
                    tracing::debug!("Next-page control did not go stale, retrying anyway")
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn has_pagination<D>(&self, driver: &D) -> Result<bool, DriverError>
    where
        D: PageDriver + ?Sized,
    {
        Ok(!driver.find_all(None, &self.selectors.pagination)?.is_empty())
    }

    /// Finds an activatable "next" anchor, or `None` when on the last page
    fn next_control<D>(&self, driver: &D) -> Result<Option<ElementHandle>, DriverError>
    where
        D: PageDriver + ?Sized,
    {
        if !self.has_pagination(driver)? {
            return Ok(None);
        }

        let last = match driver.find(None, &self.selectors.pagination_last) {
            Ok(last) => last,
            Err(DriverError::NoSuchElement { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        if is_disabled(driver, &last)? {
            return Ok(None);
        }

        let anchor = match driver.find_all(Some(&last), "a")?.into_iter().next() {
            Some(anchor) => anchor,
            None => return Ok(None),
        };
        if is_disabled(driver, &anchor)? {
            return Ok(None);
        }

        Ok(Some(anchor))
    }
}

fn is_disabled<D>(driver: &D, element: &ElementHandle) -> Result<bool, DriverError>
where
    D: PageDriver + ?Sized,
{
    Ok(driver
        .attribute(element, "class")?
        .is_some_and(|class| class.contains(DISABLED_CLASS)))
}
