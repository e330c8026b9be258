//! In-memory page driver for unit tests

use super::{DomSnapshot, DriverError, ElementHandle, PageDriver};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use url::Url;

/// Serves canned HTML by URL and can be told to fail upcoming clicks
#[derive(Default)]
pub(crate) struct FakeDriver {
    pages: HashMap<String, String>,
    page: Option<DomSnapshot>,
    generation: u64,
    click_failures: VecDeque<DriverError>,
    pub navigations: Vec<String>,
    pub clicks: usize,
    pub quit_calls: usize,
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(normalize(url), html.to_string());
        self
    }

    /// Queues errors returned by the next clicks, one per click
    pub fn failing_clicks(mut self, errors: impl IntoIterator<Item = DriverError>) -> Self {
        self.click_failures.extend(errors);
        self
    }

    fn page(&self) -> Result<&DomSnapshot, DriverError> {
        self.page.as_ref().ok_or(DriverError::NoPage)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let key = normalize(url);
        self.navigations.push(key.clone());

        let html = self
            .pages
            .get(&key)
            .cloned()
            .ok_or_else(|| DriverError::Navigation {
                url: url.to_string(),
                message: "HTTP 404".to_string(),
            })?;

        let parsed = Url::parse(&key).map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        self.generation += 1;
        self.page = Some(DomSnapshot::new(parsed, html, self.generation));
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
        self.clicks += 1;
        if let Some(error) = self.click_failures.pop_front() {
            return Err(error);
        }
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
        self.quit_calls += 1;
        self.page = None;
        self.generation += 1;
        Ok(())
    }
}
