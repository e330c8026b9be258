//! Conversion of rendered text fields into numbers
//!
//! Every conversion is total: text that does not parse degrades to a zero
//! default and is logged, and the record is kept.

use super::{NormalizedProduct, Parsed, RawProduct};

/// Currency symbols stripped from price text
const CURRENCY_SYMBOLS: [char; 12] = ['$', '€', '£', '¥', '₹', '₩', '₽', '¢', '₺', '₫', '₱', '₪'];

/// Highest star rating a catalog item can carry
const MAX_RATING: u8 = 5;

/// Parses price text such as `"$1,099.99"` into a non-negative decimal
pub fn parse_price(raw: &str) -> Parsed<f64> {
    let chars: Vec<char> = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let cleaned: String = chars
        .iter()
        .enumerate()
        .filter(|(i, c)| **c != ',' || !is_thousands_group(&chars[i + 1..]))
        .map(|(_, c)| *c)
        .collect();

    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Parsed::Ok(value),
        Ok(value) => Parsed::Defaulted(0.0, format!("price {} is out of range", value)),
        Err(e) => Parsed::Defaulted(0.0, format!("'{}' is not a price: {}", raw, e)),
    }
}

/// True if `rest` starts with exactly three digits, as after a grouping comma
fn is_thousands_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && !rest.get(3).is_some_and(|c| c.is_ascii_digit())
}

/// Parses review text such as `"12 reviews"` into a count
pub fn parse_reviews(raw: &str) -> Parsed<u32> {
    let number = raw
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic())
        .trim();

    match number.parse::<u32>() {
        Ok(count) => Parsed::Ok(count),
        Err(e) => Parsed::Defaulted(0, format!("'{}' is not a review count: {}", raw, e)),
    }
}

/// Parses a `data-rating` attribute value; absent or malformed means 0 stars
pub fn parse_rating(raw: Option<&str>) -> Parsed<u8> {
    let Some(raw) = raw else {
        return Parsed::Defaulted(0, "no rating attribute".to_string());
    };

    match raw.trim().parse::<u8>() {
        Ok(stars) if stars <= MAX_RATING => Parsed::Ok(stars),
        Ok(stars) => Parsed::Defaulted(0, format!("rating {} exceeds {}", stars, MAX_RATING)),
        Err(e) => Parsed::Defaulted(0, format!("'{}' is not a rating: {}", raw, e)),
    }
}

/// Normalizes one product
pub fn normalize_product(raw: &RawProduct) -> NormalizedProduct {
    let price = parse_price(&raw.price);
    if let Some(reason) = price.reason() {
        tracing::warn!("Could not parse price for '{}': {}", raw.name, reason);
    }

    let reviews = parse_reviews(&raw.reviews);
    if let Some(reason) = reviews.reason() {
        tracing::warn!("Could not parse reviews for '{}': {}", raw.name, reason);
    }

    NormalizedProduct {
        name: raw.name.clone(),
        price: price.into_value(),
        rating: raw.rating,
        reviews: reviews.into_value(),
    }
}

/// Normalizes a whole crawl, one output record per input record
///
/// # Arguments
///
/// * `products` - Raw products in crawl order
///
/// # Returns
///
/// Normalized products in the same order. Never fails; an empty input logs a
/// warning and yields an empty output.
pub fn normalize(products: &[RawProduct]) -> Vec<NormalizedProduct> {
    if products.is_empty() {
        tracing::warn!("No products to normalize");
        return Vec::new();
    }

    products.iter().map(normalize_product).collect()
}
