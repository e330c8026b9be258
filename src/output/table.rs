//! CSV product table
//!
//! The table is encoded in memory first, so the fallback file receives
//! exactly the bytes the primary file would have.

use crate::output::{OutputError, OutputResult};
use crate::products::NormalizedProduct;
use std::fs;
use std::path::{Path, PathBuf};

/// Column names of the product table
pub const TABLE_HEADER: [&str; 4] = ["nombre", "precio", "rating", "reviews"];

/// Encodes products as CSV, header first
pub fn encode_table(products: &[NormalizedProduct]) -> OutputResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TABLE_HEADER)?;

    for product in products {
        writer.write_record([
            product.name.clone(),
            format!("{:.2}", product.price),
            product.rating.to_string(),
            product.reviews.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))
}

/// Writes the product table, falling back to an alternate file name
///
/// # Arguments
///
/// * `products` - Normalized products, one row each
/// * `primary` - Preferred table path
/// * `fallback` - Used when `primary` cannot be written (locked, read-only, ...)
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path actually written
/// * `Err(OutputError)` - Neither path could be written
pub fn write_table(
    products: &[NormalizedProduct],
    primary: &Path,
    fallback: &Path,
) -> OutputResult<PathBuf> {
    let bytes = encode_table(products)?;

    match fs::write(primary, &bytes) {
        Ok(()) => {
            tracing::info!("CSV saved to {}", primary.display());
            Ok(primary.to_path_buf())
        }
        Err(e) => {
            tracing::warn!(
                "{} could not be written ({}), using {} instead",
                primary.display(),
                e,
                fallback.display()
            );
            fs::write(fallback, &bytes)?;
            tracing::info!("CSV saved to {}", fallback.display());
            Ok(fallback.to_path_buf())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn products() -> Vec<NormalizedProduct> {
        vec![
            NormalizedProduct {
                name: "Acer Aspire 3, 15.6\"".to_string(),
                price: 494.7,
                rating: 4,
                reviews: 2,
            },
            NormalizedProduct {
                name: "Nokia 123".to_string(),
                price: 24.99,
                rating: 3,
                reviews: 7,
            },
        ]
    }

    #[test]
    fn test_encode_table() {
        let csv = String::from_utf8(encode_table(&products()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "nombre,precio,rating,reviews");
        assert_eq!(lines[1], r#""Acer Aspire 3, 15.6""",494.70,4,2"#);
        assert_eq!(lines[2], "Nokia 123,24.99,3,7");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_encode_empty_table_has_header() {
        let csv = String::from_utf8(encode_table(&[]).unwrap()).unwrap();
        assert_eq!(csv, "nombre,precio,rating,reviews\n");
    }

    #[test]
    fn test_write_primary_path() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("products.csv");
        let fallback = dir.path().join("products_output.csv");

        let written = write_table(&products(), &primary, &fallback).unwrap();

        assert_eq!(written, primary);
        assert!(primary.exists());
        assert!(!fallback.exists());
    }

    #[test]
    fn test_unwritable_primary_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("missing-dir").join("products.csv");
        let fallback = dir.path().join("products_output.csv");

        let written = write_table(&products(), &primary, &fallback).unwrap();

        assert_eq!(written, fallback);
        assert!(!primary.exists());
        assert_eq!(
            fs::read(&fallback).unwrap(),
            encode_table(&products()).unwrap()
        );
    }

    #[test]
    fn test_both_paths_unwritable() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("a").join("products.csv");
        let fallback = dir.path().join("b").join("products_output.csv");

        let result = write_table(&products(), &primary, &fallback);
        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
