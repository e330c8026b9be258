//! Field extraction for a single listing item

use crate::config::SelectorConfig;
use crate::driver::{DriverError, ElementHandle, PageDriver};
use crate::products::{parse_rating, RawProduct};
use crate::CatalogError;

/// Attribute holding an item's star count
const RATING_ATTRIBUTE: &str = "data-rating";

/// Reads one product card into a [`RawProduct`]
///
/// Name, price and reviews are required: a missing element is an
/// [`CatalogError::Extraction`] for the whole item. A missing rating element
/// or attribute means zero stars.
///
/// # Arguments
///
/// * `driver` - Driver with the listing page loaded
/// * `item` - Handle of the product card
/// * `selectors` - Field selectors, relative to the card
pub fn extract_product<D>(
    driver: &D,
    item: &ElementHandle,
    selectors: &SelectorConfig,
) -> Result<RawProduct, CatalogError>
where
    D: PageDriver + ?Sized,
{
    let name = required_text(driver, item, &selectors.title, "name")?;
    let price = required_text(driver, item, &selectors.price, "price")?;

    let rating_raw = match driver.find(Some(item), &selectors.rating) {
        Ok(element) => driver
            .attribute(&element, RATING_ATTRIBUTE)
            .map_err(|source| CatalogError::Extraction {
                field: "rating",
                source,
            })?,
        Err(DriverError::NoSuchElement { .. }) => None,
        Err(source) => {
            return Err(CatalogError::Extraction {
                field: "rating",
                source,
            })
        }
    };

    let rating = parse_rating(rating_raw.as_deref());
    if let Some(reason) = rating.reason() {
        tracing::debug!("Rating for '{}' defaulted to 0: {}", name, reason);
    }

    let reviews = required_text(driver, item, &selectors.reviews, "reviews")?;

    Ok(RawProduct {
        name,
        price,
        rating: rating.into_value(),
        reviews,
    })
}

fn required_text<D>(
    driver: &D,
    item: &ElementHandle,
    selector: &str,
    field: &'static str,
) -> Result<String, CatalogError>
where
    D: PageDriver + ?Sized,
{
    driver
        .find(Some(item), selector)
        .and_then(|element| driver.text(&element))
        .map_err(|source| CatalogError::Extraction { field, source })
}
