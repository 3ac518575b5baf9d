//! Rating enrichment from the external ratings service.
//!
//! The ratings service is independent of the catalog. A page of views is
//! enriched with a single batched call; if that call fails for any reason
//! the views keep [`DEFAULT_RATING`] and the query still succeeds.

mod http;

pub use http::{HttpRatingsClient, CLIENT_REF_ID_HEADER};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::metrics::{RATINGS_REQUESTS, RATINGS_REQUEST_DURATION};
use crate::view::{MovieView, DEFAULT_RATING};

/// A rating returned by the ratings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub movie_id: i64,
    pub rating: f64,
}

/// Errors that can occur when calling the ratings service.
#[derive(Debug, Error)]
pub enum RatingsError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Source of movie ratings.
#[async_trait]
pub trait RatingsSource: Send + Sync {
    /// Fetch ratings for a batch of movie ids in one call.
    ///
    /// The response may cover only some of the ids.
    async fn fetch_ratings(
        &self,
        movie_ids: &[i64],
        ctx: &RequestContext,
    ) -> Result<Vec<RatingRecord>, RatingsError>;
}

/// What happened when a batch of views was enriched.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentOutcome {
    /// Ratings were applied; `matched` views got a rating from the service.
    Applied { matched: usize },
    /// The ratings call failed; every view has the default rating.
    Degraded { reason: String },
    /// Nothing to enrich.
    Skipped,
}

/// Applies ratings from a [`RatingsSource`] to views.
#[derive(Clone)]
pub struct RatingEnricher {
    source: Arc<dyn RatingsSource>,
}

impl RatingEnricher {
    pub fn new(source: Arc<dyn RatingsSource>) -> Self {
        Self { source }
    }

    /// Enrich all views with one ratings call. Never fails.
    pub async fn enrich(&self, views: &mut [MovieView], ctx: &RequestContext) -> EnrichmentOutcome {
        if views.is_empty() {
            return EnrichmentOutcome::Skipped;
        }

        let movie_ids: Vec<i64> = views.iter().map(|v| v.movie_id).collect();
        debug!(
            count = movie_ids.len(),
            client_ref_id = ctx.client_ref_id(),
            "Requesting ratings"
        );

        let start = Instant::now();
        let result = self.source.fetch_ratings(&movie_ids, ctx).await;
        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(records) => {
                RATINGS_REQUEST_DURATION
                    .with_label_values(&["success"])
                    .observe(elapsed);
                RATINGS_REQUESTS.with_label_values(&["success"]).inc();

                let matched = apply_ratings(views, &records);
                debug!(
                    requested = movie_ids.len(),
                    matched, "Ratings applied"
                );
                EnrichmentOutcome::Applied { matched }
            }
            Err(e) => {
                RATINGS_REQUEST_DURATION
                    .with_label_values(&["error"])
                    .observe(elapsed);
                RATINGS_REQUESTS.with_label_values(&["error"]).inc();

                warn!(
                    error = %e,
                    client_ref_id = ctx.client_ref_id(),
                    "Ratings unavailable, using default rating"
                );
                for view in views.iter_mut() {
                    view.rating = DEFAULT_RATING;
                }
                EnrichmentOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Set each view's rating from the matching record.
///
/// Views without a record get [`DEFAULT_RATING`]. If the service returns the
/// same id twice, the first record wins. Returns the number of views matched.
pub fn apply_ratings(views: &mut [MovieView], records: &[RatingRecord]) -> usize {
    let mut by_id: HashMap<i64, f64> = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(record.movie_id).or_insert(record.rating);
    }

    let mut matched = 0;
    for view in views.iter_mut() {
        match by_id.get(&view.movie_id) {
            Some(rating) => {
                view.rating = *rating;
                matched += 1;
            }
            None => view.rating = DEFAULT_RATING,
        }
    }
    matched
}
