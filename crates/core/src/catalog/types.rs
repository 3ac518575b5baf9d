//! Types for the movie catalog store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie as persisted in the catalog database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMovie {
    /// Catalog identifier (positive).
    pub movie_id: i64,
    /// IMDb reference (e.g., "tt0133093").
    pub imdb_id: String,
    pub title: String,
    pub overview: Option<String>,
    /// Production companies, as a single stored string.
    pub production_companies: Option<String>,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Budget in whole currency units.
    pub budget: i64,
    pub revenue: f64,
    /// Runtime in minutes.
    pub runtime: f64,
    pub language: Option<String>,
    /// JSON-encoded genre list, see [`crate::genre`].
    pub genres: Option<String>,
    /// Lifecycle status (e.g., "Released").
    pub status: Option<String>,
}

impl StoredMovie {
    /// Year parsed from the first four characters of the release date.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// A page of results to fetch.
///
/// Results are always ordered by title ascending, with the movie id as the
/// tie-break. The order is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Page size (never zero once validated).
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A page of results returned by a store.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of items actually returned (may be less than the page size).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Errors for catalog store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_with_date(date: Option<&str>) -> StoredMovie {
        StoredMovie {
            movie_id: 1,
            imdb_id: "tt0000001".to_string(),
            title: "Test".to_string(),
            overview: None,
            production_companies: None,
            release_date: date.map(str::to_string),
            budget: 0,
            revenue: 0.0,
            runtime: 0.0,
            language: None,
            genres: None,
            status: None,
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie_with_date(Some("1999-03-31")).release_year(), Some(1999));
        assert_eq!(movie_with_date(Some("2022")).release_year(), Some(2022));
        assert_eq!(movie_with_date(Some("99-1")).release_year(), None);
        assert_eq!(movie_with_date(Some("")).release_year(), None);
        assert_eq!(movie_with_date(None).release_year(), None);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
        assert_eq!(
            PageRequest::new(u32::MAX, u32::MAX).offset(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_page_len() {
        let page = Page::new(vec![1, 2, 3]);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert!(Page::<u8>::new(vec![]).is_empty());
    }
}
