//! Text summary generation

use crate::output::report::CrawlReport;
use crate::output::OutputResult;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

/// Writes the summary of `report` to `output_path`
pub fn write_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    fs::write(output_path, format_summary(report, Utc::now()))?;
    Ok(())
}

/// Formats a crawl report as plain text
///
/// ```text
/// Total products: 147
/// Average price: $403.71
/// Top 3 products:
/// - Iphone | 5⭐ | 12 reviews | $899.99
/// ```
pub fn format_summary(report: &CrawlReport, generated_at: DateTime<Utc>) -> String {
    let mut text = String::new();

    text.push_str(&format!("Total products: {}\n", report.total()));
    text.push_str(&format!("Average price: ${:.2}\n", report.average_price()));
    text.push_str(&format!("Top {} products:\n", report.top().len()));
    for product in report.top() {
        text.push_str(&format!(
            "- {} | {}⭐ | {} reviews | ${:.2}\n",
            product.name, product.rating, product.reviews, product.price
        ));
    }
    text.push_str(&format!(
        "\nGenerated at {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    text
}
