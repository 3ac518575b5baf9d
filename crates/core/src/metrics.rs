//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog queries (by operation and result)
//! - The ratings service (request outcomes and latency)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Catalog Query Metrics
// =============================================================================

/// Catalog queries total by operation and result.
pub static CATALOG_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinedex_catalog_queries_total", "Total catalog queries"),
        &["operation", "result"], // result: "ok", "not_found", "invalid", "upstream_error", "internal_error"
    )
    .unwrap()
});

/// Movies returned per listing.
pub static CATALOG_PAGE_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinedex_catalog_page_items",
            "Number of movies returned per listing",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &["operation"],
    )
    .unwrap()
});

// =============================================================================
// Ratings Service Metrics
// =============================================================================

/// Ratings service request duration.
pub static RATINGS_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinedex_ratings_request_duration_seconds",
            "Duration of ratings service calls",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["status"],
    )
    .unwrap()
});

/// Ratings service requests total.
pub static RATINGS_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinedex_ratings_requests_total",
            "Total ratings service requests",
        ),
        &["status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_QUERIES.clone()),
        Box::new(CATALOG_PAGE_SIZE.clone()),
        Box::new(RATINGS_REQUEST_DURATION.clone()),
        Box::new(RATINGS_REQUESTS.clone()),
    ]
}
