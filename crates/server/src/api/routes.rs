use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::{metrics_middleware, REQUEST_ID};
use super::{handlers, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Movies
        .route("/movies", get(movies::list_movies))
        .route("/movies/", get(movies::list_movies))
        .route("/movies/year/{year}", get(movies::list_movies_by_year))
        .route("/movies/genre/{genre}", get(movies::list_movies_by_genre))
        .route("/movies/{movie_id}", get(movies::get_movie))
        .with_state(state);

    // Layers run bottom-up on requests: the request id is set before
    // tracing and handlers see it.
    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
}
