//! Scripted ratings source for testing.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::ratings::{RatingRecord, RatingsError, RatingsSource};

/// A recorded ratings call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRatingsCall {
    pub movie_ids: Vec<i64>,
    pub client_ref_id: Option<String>,
}

/// Mock implementation of the [`RatingsSource`] trait.
///
/// Answers with the configured rating for each requested id that has one,
/// in request order. Ids without a rating are left out of the response.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRatings {
    ratings: Arc<RwLock<BTreeMap<i64, f64>>>,
    calls: Arc<RwLock<Vec<RecordedRatingsCall>>>,
    /// If set, every call fails with this status.
    failure_status: Arc<RwLock<Option<u16>>>,
}

impl ScriptedRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rating returned for a movie.
    pub async fn set_rating(&self, movie_id: i64, rating: f64) {
        self.ratings.write().await.insert(movie_id, rating);
    }

    /// Make every call fail with an API error carrying `status`.
    pub async fn fail_with_status(&self, status: u16) {
        *self.failure_status.write().await = Some(status);
    }

    /// Make calls succeed again.
    pub async fn recover(&self) {
        *self.failure_status.write().await = None;
    }

    /// Get all recorded calls.
    pub async fn calls(&self) -> Vec<RecordedRatingsCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl RatingsSource for ScriptedRatings {
    async fn fetch_ratings(
        &self,
        movie_ids: &[i64],
        ctx: &RequestContext,
    ) -> Result<Vec<RatingRecord>, RatingsError> {
        self.calls.write().await.push(RecordedRatingsCall {
            movie_ids: movie_ids.to_vec(),
            client_ref_id: ctx.client_ref_id().map(str::to_string),
        });

        if let Some(status) = *self.failure_status.read().await {
            return Err(RatingsError::ApiError {
                status,
                message: "scripted failure".to_string(),
            });
        }

        let ratings = self.ratings.read().await;
        Ok(movie_ids
            .iter()
            .filter_map(|id| {
                ratings.get(id).map(|rating| RatingRecord {
                    movie_id: *id,
                    rating: *rating,
                })
            })
            .collect())
    }
}
