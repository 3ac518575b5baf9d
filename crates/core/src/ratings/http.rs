//! HTTP client for the ratings service.
//!
//! Wire contract: `POST <url>` with a JSON array of movie ids as the body;
//! a success response is a JSON array of `{"movieId": .., "rating": ..}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use super::{RatingRecord, RatingsError, RatingsSource};
use crate::config::RatingsConfig;
use crate::context::RequestContext;

/// Header carrying the caller's correlation id.
pub const CLIENT_REF_ID_HEADER: &str = "clientRefId";

/// Ratings service client.
pub struct HttpRatingsClient {
    client: Client,
    url: String,
}

impl HttpRatingsClient {
    /// Create a new ratings client with the configured timeout.
    pub fn new(config: &RatingsConfig) -> Result<Self, RatingsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RatingsSource for HttpRatingsClient {
    async fn fetch_ratings(
        &self,
        movie_ids: &[i64],
        ctx: &RequestContext,
    ) -> Result<Vec<RatingRecord>, RatingsError> {
        debug!(
            "Ratings request: {} ids, clientRefId={:?}",
            movie_ids.len(),
            ctx.client_ref_id()
        );

        let mut request = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(movie_ids);

        if let Some(client_ref_id) = ctx.client_ref_id() {
            request = request.header(CLIENT_REF_ID_HEADER, client_ref_id);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RatingsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json::<Vec<RatingRecord>>().await.map_err(|e| {
            RatingsError::ParseError(format!("Failed to parse ratings response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, timeout_secs: u64) -> HttpRatingsClient {
        HttpRatingsClient::new(&RatingsConfig {
            url: server.url("/ratings"),
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ratings_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ratings")
                    .header("content-type", "application/json")
                    .json_body(json!([1, 2]));
                then.status(200)
                    .json_body(json!([{"movieId": 1, "rating": 4.5}]));
            })
            .await;

        let client = client_for(&server, 5);
        let records = client
            .fetch_ratings(&[1, 2], &RequestContext::anonymous())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            records,
            vec![RatingRecord {
                movie_id: 1,
                rating: 4.5
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_ratings_sends_client_ref_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ratings")
                    .header("clientrefid", "corr-7");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = client_for(&server, 5);
        let ctx = RequestContext::new(Some("corr-7".to_string()));
        let records = client.fetch_ratings(&[3], &ctx).await.unwrap();

        mock.assert_async().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_ratings_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ratings");
                then.status(500).body("boom");
            })
            .await;

        let client = client_for(&server, 5);
        let result = client
            .fetch_ratings(&[1], &RequestContext::anonymous())
            .await;

        match result {
            Err(RatingsError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_ratings_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ratings");
                then.status(200).body("{\"not\": \"a list\"}");
            })
            .await;

        let client = client_for(&server, 5);
        let result = client
            .fetch_ratings(&[1], &RequestContext::anonymous())
            .await;

        assert!(matches!(result, Err(RatingsError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_fetch_ratings_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ratings");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!([]));
            })
            .await;

        let client = client_for(&server, 1);
        let result = client
            .fetch_ratings(&[1], &RequestContext::anonymous())
            .await;

        assert!(matches!(result, Err(RatingsError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_fetch_ratings_unreachable() {
        let client = HttpRatingsClient::new(&RatingsConfig {
            url: "http://127.0.0.1:1/ratings".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let result = client
            .fetch_ratings(&[1], &RequestContext::anonymous())
            .await;

        assert!(matches!(result, Err(RatingsError::HttpError(_))));
    }
}
