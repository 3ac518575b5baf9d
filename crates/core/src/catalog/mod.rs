//! Movie catalog storage.
//!
//! The catalog is read-only from the service's point of view: queries page
//! through movies sorted by title, optionally filtered by release year or
//! genre.

mod sqlite;
mod types;

pub use sqlite::SqliteMovieStore;
pub use types::*;

/// Trait for movie catalog storage.
///
/// Every paged fetch orders by title ascending, then movie id.
pub trait MovieStore: Send + Sync {
    /// Fetch a page of all movies.
    fn fetch_all(&self, page: PageRequest) -> Result<Page<StoredMovie>, StoreError>;

    /// Fetch a page of movies whose release date starts with `year`.
    fn fetch_by_year(&self, year: i32, page: PageRequest)
        -> Result<Page<StoredMovie>, StoreError>;

    /// Fetch a page of movies with a genre name containing `pattern`
    /// (case-insensitive substring match).
    fn fetch_by_genre(
        &self,
        pattern: &str,
        page: PageRequest,
    ) -> Result<Page<StoredMovie>, StoreError>;

    /// Get a specific movie by id.
    fn fetch_by_id(&self, movie_id: i64) -> Result<Option<StoredMovie>, StoreError>;
}
