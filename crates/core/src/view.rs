//! Client-facing movie view and the mapping from stored rows.

use serde::{Deserialize, Serialize};

use crate::catalog::StoredMovie;
use crate::genre::{decode_genres, GenreError};

/// Rating used when the ratings service has nothing for a movie.
pub const DEFAULT_RATING: f64 = 0.0;

/// Currency symbol prefixed to the budget.
const CURRENCY_SYMBOL: &str = "$";

/// A movie as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieView {
    pub movie_id: i64,
    pub imdb_id: String,
    pub title: String,
    pub overview: Option<String>,
    pub production_companies: Option<String>,
    pub release_date: Option<String>,
    /// Formatted budget, e.g. "$63000000".
    pub budget: String,
    pub revenue: f64,
    pub runtime: f64,
    pub language: Option<String>,
    pub genres: Vec<String>,
    /// Rating from the ratings service, or [`DEFAULT_RATING`].
    #[serde(rename = "movieRating")]
    pub rating: f64,
}

/// Map a stored movie to its view.
///
/// The rating starts at [`DEFAULT_RATING`]; enrichment replaces it.
pub fn to_view(movie: &StoredMovie) -> Result<MovieView, GenreError> {
    Ok(MovieView {
        movie_id: movie.movie_id,
        imdb_id: movie.imdb_id.clone(),
        title: movie.title.clone(),
        overview: movie.overview.clone(),
        production_companies: movie.production_companies.clone(),
        release_date: movie.release_date.clone(),
        budget: format_budget(movie.budget),
        revenue: movie.revenue,
        runtime: movie.runtime,
        language: movie.language.clone(),
        genres: decode_genres(movie.genres.as_deref())?,
        rating: DEFAULT_RATING,
    })
}

fn format_budget(amount: i64) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}
