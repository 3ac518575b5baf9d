//! Movie catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    Json,
};
use cinedex_core::MovieView;
use serde::Deserialize;

use super::middleware::Correlation;
use super::ApiError;
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 0;
const DEFAULT_SIZE: i64 = 50;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_SIZE
}

fn page_params(
    params: Result<Query<PageParams>, QueryRejection>,
    path: &str,
) -> Result<PageParams, ApiError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))
}

fn path_param<T>(param: Result<Path<T>, PathRejection>, path: &str) -> Result<T, ApiError> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/movies
///
/// List all movies, one page at a time, sorted by title.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Correlation(ctx): Correlation,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<MovieView>>, ApiError> {
    let path = uri.path();
    let params = page_params(params, path)?;

    state
        .query()
        .list_all(params.page, params.size, &ctx)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_query(e, path))
}

/// GET /api/v1/movies/year/{year}
pub async fn list_movies_by_year(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Correlation(ctx): Correlation,
    year: Result<Path<i32>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<MovieView>>, ApiError> {
    let path = uri.path();
    let year = path_param(year, path)?;
    let params = page_params(params, path)?;

    state
        .query()
        .list_by_year(year, params.page, params.size, &ctx)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_query(e, path))
}

/// GET /api/v1/movies/genre/{genre}
///
/// Genre matching is case-insensitive and matches any genre containing the
/// given text.
pub async fn list_movies_by_genre(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Correlation(ctx): Correlation,
    genre: Result<Path<String>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<MovieView>>, ApiError> {
    let path = uri.path();
    let genre = path_param(genre, path)?;
    let params = page_params(params, path)?;

    state
        .query()
        .list_by_genre(&genre, params.page, params.size, &ctx)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_query(e, path))
}

/// GET /api/v1/movies/{movie_id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Correlation(ctx): Correlation,
    movie_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieView>, ApiError> {
    let path = uri.path();
    let movie_id = path_param(movie_id, path)?;

    match state.query().get_by_id(movie_id, &ctx).await {
        Ok(Some(movie)) => Ok(Json(movie)),
        Ok(None) => Err(ApiError::not_found("Movie not found", path)),
        Err(e) => Err(ApiError::from_query(e, path)),
    }
}
