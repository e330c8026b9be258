//! Page driver capability
//!
//! The crawler never talks to a browser or an HTTP client directly. It drives
//! a [`PageDriver`]: something that can load a URL, answer selector queries
//! against the rendered page, read text and attributes, click, and release
//! its session. This module contains:
//! - The [`PageDriver`] trait and the [`ElementHandle`] locator it hands out
//! - [`DomSnapshot`], the selector engine shared by HTML-backed drivers
//! - [`HttpPageDriver`], a driver that renders pages with a plain GET
//! - [`Wait`], polling with a timeout budget over any driver

mod http;
mod snapshot;
mod wait;

#[cfg(test)]
pub(crate) mod fake;

pub use http::{build_http_client, HttpPageDriver};
pub use snapshot::DomSnapshot;
pub use wait::Wait;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a page driver
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("No page is loaded")]
    NoPage,

    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("No element matches selector '{selector}'")]
    NoSuchElement { selector: String },

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("Element reference is stale")]
    StaleElement,

    #[error("Click intercepted: {0}")]
    ClickIntercepted(String),

    #[error("Click failed: {0}")]
    Click(String),

    #[error("Timed out after {waited_ms}ms waiting for {condition}")]
    Timeout { condition: String, waited_ms: u64 },
}

impl DriverError {
    /// Returns true for click failures worth retrying on the same page
    pub fn is_transient_click(&self) -> bool {
        matches!(
            self,
            Self::StaleElement | Self::ClickIntercepted(_) | Self::Click(_)
        )
    }

    /// Returns true if a wait ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if a page failed to load
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation { .. } | Self::Http { .. })
    }

    /// Reports a page that failed to load after a click as a click failure
    ///
    /// The current page stays rendered, so the click can be retried on it.
    pub(crate) fn into_click_failure(self) -> Self {
        if self.is_navigation() {
            Self::Click(self.to_string())
        } else {
            self
        }
    }
}

/// One step of an element locator: the `index`-th match of `selector`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Locator {
    pub selector: String,
    pub index: usize,
}

/// Reference to an element on a rendered page
///
/// A handle is a chain of selector steps, each one scoped to the element the
/// previous step found, tagged with the generation of the page it was issued
/// for. Any navigation bumps the generation, after which the handle is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    generation: u64,
    path: Vec<Locator>,
}

impl ElementHandle {
    pub(crate) fn new(generation: u64, path: Vec<Locator>) -> Self {
        Self { generation, path }
    }

    /// Page generation this handle belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selector of the innermost step
    pub fn selector(&self) -> &str {
        self.path
            .last()
            .map(|step| step.selector.as_str())
            .unwrap_or("")
    }

    pub(crate) fn path(&self) -> &[Locator] {
        &self.path
    }

    /// Builds the handle of the `index`-th `selector` match inside this element
    pub(crate) fn child(&self, selector: &str, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(Locator {
            selector: selector.to_string(),
            index,
        });
        Self {
            generation: self.generation,
            path,
        }
    }
}

/// Capability surface the crawler needs from a page automation backend
///
/// Queries are synchronous reads of the currently rendered page; operations
/// that change the page are async. `scope = None` searches the whole page,
/// `Some(handle)` searches only inside that element.
#[async_trait]
pub trait PageDriver: Send {
    /// Loads `url`, invalidating every handle issued for the previous page
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// URL of the page currently loaded, if any
    fn current_url(&self) -> Option<String>;

    /// Finds every element matching `selector`, in document order
    fn find_all(
        &self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError>;

    /// Finds the first element matching `selector`
    fn find(
        &self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<ElementHandle, DriverError> {
        self.find_all(scope, selector)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement {
                selector: selector.to_string(),
            })
    }

    /// Whitespace-collapsed text content of an element
    fn text(&self, element: &ElementHandle) -> Result<String, DriverError>;

    /// Attribute value; link attributes come back as absolute URLs
    fn attribute(&self, element: &ElementHandle, name: &str)
        -> Result<Option<String>, DriverError>;

    /// Activates an element
    async fn click(&mut self, element: &ElementHandle) -> Result<(), DriverError>;

    /// True once the page `element` was issued for is no longer rendered
    fn is_stale(&self, element: &ElementHandle) -> bool;

    /// Releases the session
    async fn quit(&mut self) -> Result<(), DriverError>;
}
