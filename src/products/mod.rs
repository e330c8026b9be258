//! Product records and navigation targets
//!
//! This module holds the data flowing through a crawl:
//! - `NavigationTarget`: a listing URL produced by link discovery
//! - `RawProduct`: item fields exactly as rendered
//! - `NormalizedProduct`: the same item with numeric price and review count
//! - `Parsed`: outcome of a single field conversion, happy path or default

mod normalize;

pub use normalize::{normalize, normalize_product, parse_price, parse_rating, parse_reviews};

use std::fmt;

/// URL of one category or subcategory listing to crawl
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationTarget(String);

impl NavigationTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the URL follows the catalog's path convention
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NavigationTarget {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// One scraped listing item, fields as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProduct {
    pub name: String,

    /// Price text, possibly with a currency symbol
    pub price: String,

    /// Star rating, 0 when the item carries none
    pub rating: u8,

    /// Review text, possibly with a unit suffix ("12 reviews")
    pub reviews: String,
}

/// A product with its numeric fields parsed
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProduct {
    pub name: String,
    pub price: f64,
    pub rating: u8,
    pub reviews: u32,
}

/// Result of converting one raw field
///
/// `Defaulted` carries the substituted value and why the raw text was
/// rejected, so callers can tell a genuine zero from a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Ok(T),
    Defaulted(T, String),
}

impl<T> Parsed<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Defaulted(value, _) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) | Self::Defaulted(value, _) => value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(..))
    }

    /// Why the default was used, if it was
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Defaulted(_, reason) => Some(reason),
        }
    }
}
