//! Selector engine over a rendered HTML page
//!
//! A [`DomSnapshot`] holds the markup of one loaded page together with its
//! generation number, and answers the read-only half of the
//! [`PageDriver`](super::PageDriver) surface. The document is re-parsed per
//! query so the snapshot stays `Send`.

use super::{DriverError, ElementHandle, Locator};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Attributes whose values are resolved against the page URL
const LINK_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// One rendered page
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    url: Url,
    html: String,
    generation: u64,
}

impl DomSnapshot {
    pub fn new(url: Url, html: String, generation: u64) -> Self {
        Self {
            url,
            html,
            generation,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Finds every element matching `selector` inside `scope` (or the whole page)
    pub fn find_all(
        &self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);

        let (count, base) = match scope {
            None => (document.select(&parsed).count(), Vec::new()),
            Some(handle) => {
                self.check_generation(handle)?;
                let element = resolve(&document, handle)?;
                (element.select(&parsed).count(), handle.path().to_vec())
            }
        };

        Ok((0..count)
            .map(|index| {
                let mut path = base.clone();
                path.push(Locator {
                    selector: selector.to_string(),
                    index,
                });
                ElementHandle::new(self.generation, path)
            })
            .collect())
    }

    /// Whitespace-collapsed, trimmed text of an element
    pub fn text(&self, handle: &ElementHandle) -> Result<String, DriverError> {
        self.with_element(handle, |element| {
            let raw: String = element.text().collect();
            raw.split_whitespace().collect::<Vec<_>>().join(" ")
        })
    }

    /// Attribute value of an element
    ///
    /// `href` and `src` are returned as absolute URLs, the way a browser
    /// reports them.
    pub fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        self.with_element(handle, |element| {
            element.value().attr(name).map(|value| {
                if LINK_ATTRIBUTES.contains(&name) {
                    self.url
                        .join(value.trim())
                        .map(|absolute| absolute.to_string())
                        .unwrap_or_else(|_| value.to_string())
                } else {
                    value.to_string()
                }
            })
        })
    }

    /// Absolute URL a click on this element leads to
    pub fn link_target(&self, handle: &ElementHandle) -> Result<Url, DriverError> {
        let (tag, href) = self.with_element(handle, |element| {
            (
                element.value().name().to_string(),
                element.value().attr("href").map(str::to_string),
            )
        })?;

        let href = match href {
            Some(href) if tag == "a" && !href.trim().is_empty() => href,
            _ => {
                return Err(DriverError::Click(format!(
                    "<{}> matched by '{}' has no link target",
                    tag,
                    handle.selector()
                )))
            }
        };

        self.url
            .join(href.trim())
            .map_err(|e| DriverError::Click(format!("unresolvable href '{}': {}", href, e)))
    }

    /// True if the handle was issued for another page or no longer resolves
    pub fn is_stale(&self, handle: &ElementHandle) -> bool {
        if handle.generation() != self.generation {
            return true;
        }
        let document = Html::parse_document(&self.html);
        resolve(&document, handle).is_err()
    }

    fn check_generation(&self, handle: &ElementHandle) -> Result<(), DriverError> {
        if handle.generation() == self.generation {
            Ok(())
        } else {
            Err(DriverError::StaleElement)
        }
    }

    fn with_element<T>(
        &self,
        handle: &ElementHandle,
        f: impl FnOnce(ElementRef<'_>) -> T,
    ) -> Result<T, DriverError> {
        self.check_generation(handle)?;
        let document = Html::parse_document(&self.html);
        let element = resolve(&document, handle)?;
        Ok(f(element))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, DriverError> {
    Selector::parse(selector).map_err(|_| DriverError::InvalidSelector(selector.to_string()))
}

/// Walks a handle's locator chain down from the document root
fn resolve<'a>(document: &'a Html, handle: &ElementHandle) -> Result<ElementRef<'a>, DriverError> {
    let mut current: Option<ElementRef<'a>> = None;

    for step in handle.path() {
        let selector = parse_selector(&step.selector)?;
        let next = match current {
            None => document.select(&selector).nth(step.index),
            Some(scope) => scope.select(&selector).nth(step.index),
        };
        // The element this step pointed at is gone from the page
        current = Some(next.ok_or(DriverError::StaleElement)?);
    }

    current.ok_or(DriverError::StaleElement)
}
