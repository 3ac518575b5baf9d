//! In-memory movie store for testing.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::catalog::{MovieStore, Page, PageRequest, StoreError, StoredMovie};
use crate::genre::{decode_genres, genre_matches};

/// A recorded store call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedStoreCall {
    FetchAll { page: PageRequest },
    FetchByYear { year: i32, page: PageRequest },
    FetchByGenre { pattern: String, page: PageRequest },
    FetchById { movie_id: i64 },
}

/// Mock implementation of the [`MovieStore`] trait.
///
/// Follows the same ordering and filtering rules as the SQLite store:
/// title ascending with the id as tie-break, year taken from the release
/// date prefix, genre rows that cannot be decoded always match.
///
/// Store calls run on the blocking pool, so state sits behind a std lock.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<BTreeMap<i64, StoredMovie>>,
    calls: RwLock<Vec<RecordedStoreCall>>,
    /// If set, the next operation fails with this message.
    next_error: RwLock<Option<String>>,
    /// If set, every operation fails with this message.
    failure: RwLock<Option<String>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `movies`.
    pub fn with_movies(movies: Vec<StoredMovie>) -> Self {
        let store = Self::new();
        for movie in movies {
            store.add_movie(movie);
        }
        store
    }

    /// Add or replace a movie.
    pub fn add_movie(&self, movie: StoredMovie) {
        if let Ok(mut movies) = self.movies.write() {
            movies.insert(movie.movie_id, movie);
        }
    }

    /// Make the next operation fail.
    pub fn fail_next(&self, message: &str) {
        if let Ok(mut next) = self.next_error.write() {
            *next = Some(message.to_string());
        }
    }

    /// Make every operation fail until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = message.map(str::to_string);
        }
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedStoreCall> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    fn begin(&self, call: RecordedStoreCall) -> Result<(), StoreError> {
        self.calls
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?
            .push(call);

        let next = self
            .next_error
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?
            .take();
        if let Some(message) = next {
            return Err(StoreError::Database(message));
        }

        let failure = self
            .failure
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?
            .clone();
        match failure {
            Some(message) => Err(StoreError::Database(message)),
            None => Ok(()),
        }
    }

    fn select<P>(&self, page: PageRequest, predicate: P) -> Result<Page<StoredMovie>, StoreError>
    where
        P: Fn(&StoredMovie) -> bool,
    {
        let movies = self
            .movies
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        let mut matching: Vec<&StoredMovie> = movies.values().filter(|m| predicate(m)).collect();
        matching.sort_by(|a, b| {
            a.title
                .cmp(&b.title)
                .then_with(|| a.movie_id.cmp(&b.movie_id))
        });

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(items))
    }
}

impl MovieStore for InMemoryMovieStore {
    fn fetch_all(&self, page: PageRequest) -> Result<Page<StoredMovie>, StoreError> {
        self.begin(RecordedStoreCall::FetchAll { page })?;
        self.select(page, |_| true)
    }

    fn fetch_by_year(&self, year: i32, page: PageRequest) -> Result<Page<StoredMovie>, StoreError> {
        self.begin(RecordedStoreCall::FetchByYear { year, page })?;
        self.select(page, |m| m.release_year() == Some(year))
    }

    fn fetch_by_genre(
        &self,
        pattern: &str,
        page: PageRequest,
    ) -> Result<Page<StoredMovie>, StoreError> {
        self.begin(RecordedStoreCall::FetchByGenre {
            pattern: pattern.to_string(),
            page,
        })?;
        self.select(page, |m| match decode_genres(m.genres.as_deref()) {
            Ok(names) => genre_matches(&names, pattern),
            Err(_) => true,
        })
    }

    fn fetch_by_id(&self, movie_id: i64) -> Result<Option<StoredMovie>, StoreError> {
        self.begin(RecordedStoreCall::FetchById { movie_id })?;
        let movies = self
            .movies
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;
        Ok(movies.get(&movie_id).cloned())
    }
}
