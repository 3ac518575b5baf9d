//! The movie query service.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::QueryError;
use crate::catalog::{MovieStore, Page, PageRequest, StoreError, StoredMovie};
use crate::context::RequestContext;
use crate::metrics::{CATALOG_PAGE_SIZE, CATALOG_QUERIES};
use crate::ratings::{RatingEnricher, RatingsSource};
use crate::view::{to_view, MovieView};

/// Earliest release year accepted by year queries.
pub const MIN_YEAR: i32 = 1900;
/// Latest release year accepted by year queries.
pub const MAX_YEAR: i32 = 2100;

const NO_MOVIES_FOUND: &str = "No movies found";

/// Answers catalog queries: paged listings and single-movie lookups.
///
/// Every result is enriched with ratings in a single call per query. A
/// ratings failure never fails the query.
#[derive(Clone)]
pub struct MovieQueryService {
    store: Arc<dyn MovieStore>,
    enricher: RatingEnricher,
}

impl MovieQueryService {
    pub fn new(store: Arc<dyn MovieStore>, ratings: Arc<dyn RatingsSource>) -> Self {
        Self {
            store,
            enricher: RatingEnricher::new(ratings),
        }
    }

    /// List one page of all movies, sorted by title.
    pub async fn list_all(
        &self,
        page: i64,
        size: i64,
        ctx: &RequestContext,
    ) -> Result<Vec<MovieView>, QueryError> {
        let result: Result<Vec<MovieView>, QueryError> = async {
            let page = validate_page(page, size)?;
            info!("Listing movies: page {} of size {}", page.page, page.size);

            self.run_listing(ctx, move |store| store.fetch_all(page))
                .await
        }
        .await;

        record("list_all", &result);
        result
    }

    /// List one page of movies released in `year`.
    pub async fn list_by_year(
        &self,
        year: i32,
        page: i64,
        size: i64,
        ctx: &RequestContext,
    ) -> Result<Vec<MovieView>, QueryError> {
        let result: Result<Vec<MovieView>, QueryError> = async {
            let page = validate_page(page, size)?;
            validate_year(year)?;
            info!(
                "Listing movies for year {}: page {} of size {}",
                year, page.page, page.size
            );

            self.run_listing(ctx, move |store| store.fetch_by_year(year, page))
                .await
        }
        .await;

        record("list_by_year", &result);
        result
    }

    /// List one page of movies with a genre matching `genre`.
    ///
    /// Matching is a case-insensitive substring match against each genre
    /// name, so "Fiction" finds "Science Fiction".
    pub async fn list_by_genre(
        &self,
        genre: &str,
        page: i64,
        size: i64,
        ctx: &RequestContext,
    ) -> Result<Vec<MovieView>, QueryError> {
        let result: Result<Vec<MovieView>, QueryError> = async {
            let page = validate_page(page, size)?;
            let genre = validate_genre(genre)?;
            info!(
                "Listing movies for genre '{}': page {} of size {}",
                genre, page.page, page.size
            );

            self.run_listing(ctx, move |store| store.fetch_by_genre(&genre, page))
                .await
        }
        .await;

        record("list_by_genre", &result);
        result
    }

    /// Get a single movie. Returns `Ok(None)` if no movie has this id.
    pub async fn get_by_id(
        &self,
        movie_id: i64,
        ctx: &RequestContext,
    ) -> Result<Option<MovieView>, QueryError> {
        let result: Result<Option<MovieView>, QueryError> = async {
            validate_movie_id(movie_id)?;
            info!("Fetching details for movie {}", movie_id);

            let movie = self
                .with_store(move |store| store.fetch_by_id(movie_id))
                .await?;

            let Some(movie) = movie else {
                info!("Movie {} not found", movie_id);
                return Ok(None);
            };

            let mut views = map_views(std::slice::from_ref(&movie))?;
            self.enricher.enrich(&mut views, ctx).await;
            Ok(views.pop())
        }
        .await;

        record("get_by_id", &result);
        result
    }

    async fn run_listing<F>(
        &self,
        ctx: &RequestContext,
        fetch: F,
    ) -> Result<Vec<MovieView>, QueryError>
    where
        F: FnOnce(&dyn MovieStore) -> Result<Page<StoredMovie>, StoreError> + Send + 'static,
    {
        let page = self.with_store(fetch).await?;
        info!("Catalog returned {} movies", page.len());

        if page.is_empty() {
            return Err(QueryError::NotFound(NO_MOVIES_FOUND.to_string()));
        }

        let mut views = map_views(&page.items)?;
        let outcome = self.enricher.enrich(&mut views, ctx).await;
        debug!("Enrichment outcome: {:?}", outcome);

        Ok(views)
    }

    /// Run a store call on the blocking pool.
    async fn with_store<T, F>(&self, f: F) -> Result<T, QueryError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn MovieStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| {
                error!(error = %e, "Catalog task failed");
                QueryError::Internal(format!("catalog task failed: {}", e))
            })?
            .map_err(|e| {
                error!(error = %e, "Catalog query failed");
                QueryError::upstream("Failed to fetch movies", e)
            })
    }
}

fn map_views(movies: &[StoredMovie]) -> Result<Vec<MovieView>, QueryError> {
    movies
        .iter()
        .map(|movie| {
            to_view(movie).map_err(|e| {
                error!(movie_id = movie.movie_id, error = %e, "Stored movie could not be mapped");
                QueryError::upstream("Failed to read movie data", e)
            })
        })
        .collect()
}

fn validate_page(page: i64, size: i64) -> Result<PageRequest, QueryError> {
    let invalid = || {
        QueryError::Validation(
            "Invalid pagination parameters: page must be >= 0 and size must be > 0".to_string(),
        )
    };

    if page < 0 || size <= 0 {
        return Err(invalid());
    }

    let page = u32::try_from(page).map_err(|_| invalid())?;
    let size = u32::try_from(size).map_err(|_| invalid())?;
    Ok(PageRequest::new(page, size))
}

fn validate_year(year: i32) -> Result<(), QueryError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(QueryError::Validation(format!(
            "Invalid year {}: must be between {} and {}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

fn validate_genre(genre: &str) -> Result<String, QueryError> {
    let genre = genre.trim();
    if genre.is_empty() {
        return Err(QueryError::Validation(
            "Invalid genre: must not be blank".to_string(),
        ));
    }
    Ok(genre.to_string())
}

fn validate_movie_id(movie_id: i64) -> Result<(), QueryError> {
    if movie_id <= 0 {
        return Err(QueryError::Validation(format!(
            "Invalid movie id {}: must be > 0",
            movie_id
        )));
    }
    Ok(())
}

fn record<T: ItemCount>(operation: &str, result: &Result<T, QueryError>) {
    match result {
        Ok(value) => {
            CATALOG_QUERIES.with_label_values(&[operation, "ok"]).inc();
            CATALOG_PAGE_SIZE
                .with_label_values(&[operation])
                .observe(value.item_count() as f64);
        }
        Err(e) => {
            CATALOG_QUERIES.with_label_values(&[operation, e.kind()]).inc();
        }
    }
}

/// Number of movies in a query result, for metrics.
trait ItemCount {
    fn item_count(&self) -> usize;
}

impl ItemCount for Vec<MovieView> {
    fn item_count(&self) -> usize {
        self.len()
    }
}

impl ItemCount for Option<MovieView> {
    fn item_count(&self) -> usize {
        usize::from(self.is_some())
    }
}
