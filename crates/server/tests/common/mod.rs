//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router over an
//! in-memory movie store and a scripted ratings source, so API behavior can
//! be tested without a database file or a ratings service.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cinedex_core::{
    testing::{InMemoryMovieStore, ScriptedRatings},
    Config, DatabaseConfig, MovieQueryService, RatingsConfig, ServerConfig, StoredMovie,
};
use cinedex_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use cinedex_core::testing::fixtures;

/// Test fixture for API testing with test doubles.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_list() {
///     let fixture = TestFixture::with_movies(vec![fixtures::stored_movie(1, "Heat", None, &[])]);
///     fixture.ratings.set_rating(1, 4.0).await;
///
///     let response = fixture.get("/api/v1/movies").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Movie store - seed movies, inject failures
    pub store: Arc<InMemoryMovieStore>,
    /// Ratings source - configure ratings, inspect calls
    pub ratings: Arc<ScriptedRatings>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture with an empty catalog.
    pub fn new() -> Self {
        Self::with_movies(Vec::new())
    }

    /// Create a fixture whose catalog holds `movies`.
    pub fn with_movies(movies: Vec<StoredMovie>) -> Self {
        let store = Arc::new(InMemoryMovieStore::with_movies(movies));
        let ratings = Arc::new(ScriptedRatings::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: "unused.db".into(),
            },
            ratings: RatingsConfig {
                url: "http://ratings.test/api/ratings?key=secret".to_string(),
                timeout_secs: 5,
            },
        };

        let query = MovieQueryService::new(store.clone(), ratings.clone());
        let state = Arc::new(AppState::new(config, query));
        let router = create_router(state);

        Self {
            router,
            store,
            ratings,
        }
    }

    /// Send a GET request to the test router.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.get_with_headers(path, &[]).await
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// A small catalog used across API tests.
pub fn sample_catalog() -> Vec<StoredMovie> {
    vec![
        fixtures::stored_movie(1, "Test Movie", Some("2021-06-01"), &["Drama"]),
        fixtures::stored_movie(2, "Alien", Some("1979-05-25"), &["Horror", "Science Fiction"]),
        fixtures::stored_movie(3, "Heat", Some("1995-12-15"), &["Crime", "Drama"]),
    ]
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
