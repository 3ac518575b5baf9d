//! Catalog query orchestration.
//!
//! Validates parameters, fetches a page from the store, maps rows to views
//! and enriches the page with ratings.

mod error;
mod service;

pub use error::QueryError;
pub use service::{MovieQueryService, MAX_YEAR, MIN_YEAR};
