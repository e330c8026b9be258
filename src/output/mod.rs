//! Output module for crawl results
//!
//! This module handles:
//! - Ranking products and computing aggregate statistics
//! - Writing the product table as CSV, with a fallback file name
//! - Writing the human-readable summary

mod report;
mod summary;
mod table;

pub use report::{ranking_order, report, CrawlReport};
pub use summary::{format_summary, write_summary};
pub use table::{encode_table, write_table, TABLE_HEADER};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
