//! Testing utilities: in-memory stand-ins for the catalog store and the
//! ratings service.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinedex_core::testing::{fixtures, InMemoryMovieStore, ScriptedRatings};
//!
//! let store = InMemoryMovieStore::new();
//! store.add_movie(fixtures::stored_movie(1, "Test Movie", Some("2021-06-01"), &["Drama"]));
//!
//! let ratings = ScriptedRatings::new();
//! ratings.set_rating(1, 4.5).await;
//! ```

mod memory_store;
mod scripted_ratings;

pub use memory_store::{InMemoryMovieStore, RecordedStoreCall};
pub use scripted_ratings::{RecordedRatingsCall, ScriptedRatings};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::StoredMovie;
    use crate::genre::encode_genres;
    use crate::view::{MovieView, DEFAULT_RATING};

    /// Create a stored movie with reasonable defaults.
    pub fn stored_movie(
        movie_id: i64,
        title: &str,
        release_date: Option<&str>,
        genres: &[&str],
    ) -> StoredMovie {
        StoredMovie {
            movie_id,
            imdb_id: format!("tt{:07}", movie_id),
            title: title.to_string(),
            overview: Some(format!("Overview of {}", title)),
            production_companies: Some("Test Pictures".to_string()),
            release_date: release_date.map(str::to_string),
            budget: 1_000_000,
            revenue: 2_500_000.0,
            runtime: 110.0,
            language: Some("en".to_string()),
            genres: Some(encode_genres(genres).unwrap_or_else(|_| "[]".to_string())),
            status: Some("Released".to_string()),
        }
    }

    /// Create a stored movie whose genres column cannot be decoded.
    pub fn corrupt_movie(movie_id: i64, title: &str) -> StoredMovie {
        let mut movie = stored_movie(movie_id, title, Some("2020-01-01"), &[]);
        movie.genres = Some("{not json".to_string());
        movie
    }

    /// Create a movie view with the default rating.
    pub fn movie_view(movie_id: i64, title: &str) -> MovieView {
        MovieView {
            movie_id,
            imdb_id: format!("tt{:07}", movie_id),
            title: title.to_string(),
            overview: None,
            production_companies: None,
            release_date: None,
            budget: "$0".to_string(),
            revenue: 0.0,
            runtime: 0.0,
            language: None,
            genres: Vec::new(),
            rating: DEFAULT_RATING,
        }
    }
}
