//! Product ranking and aggregate statistics

use crate::products::NormalizedProduct;
use std::cmp::Ordering;

/// Summary of one crawl: size, mean price and best-ranked products
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlReport {
    total: usize,
    average_price: f64,
    top: Vec<NormalizedProduct>,
}

impl CrawlReport {
    /// Number of products in the crawl
    pub fn total(&self) -> usize {
        self.total
    }

    /// Mean price over every product, defaulted prices included
    pub fn average_price(&self) -> f64 {
        self.average_price
    }

    /// Best products, best first
    pub fn top(&self) -> &[NormalizedProduct] {
        &self.top
    }
}

/// Orders products best-first: rating, then review count, then price
///
/// All three keys descend. Prices compare with `total_cmp`, so the order is
/// total even for unusual floats.
pub fn ranking_order(a: &NormalizedProduct, b: &NormalizedProduct) -> Ordering {
    b.rating
        .cmp(&a.rating)
        .then_with(|| b.reviews.cmp(&a.reviews))
        .then_with(|| b.price.total_cmp(&a.price))
}

/// Builds the crawl report
///
/// # Arguments
///
/// * `products` - Normalized products
/// * `top_n` - How many products to keep in the ranking
///
/// # Returns
///
/// `None` (with a warning) when there is nothing to report.
pub fn report(products: &[NormalizedProduct], top_n: usize) -> Option<CrawlReport> {
    if products.is_empty() {
        tracing::warn!("No products to analyze");
        return None;
    }

    let total = products.len();
    let average_price = products.iter().map(|p| p.price).sum::<f64>() / total as f64;

    let mut ranked = products.to_vec();
    // Stable sort: full ties keep crawl order
    ranked.sort_by(ranking_order);
    ranked.truncate(top_n);

    Some(CrawlReport {
        total,
        average_price,
        top: ranked,
    })
}
