//! State module for tracking listing pagination
//!
//! - `ListingState`: the paginator's current phase (loading, draining)
//! - `ListingEnd`: why a listing stopped (last page, timeout, retries exhausted)

mod listing;

pub use listing::{ListingEnd, ListingState};
