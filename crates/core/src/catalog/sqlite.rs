//! SQLite-backed movie catalog implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use super::{MovieStore, Page, PageRequest, StoreError, StoredMovie};
use crate::genre::{decode_genres, genre_matches};

const MOVIE_COLUMNS: &str = "movieId, imdbId, title, overview, productionCompanies, releaseDate, \
                             budget, revenue, runtime, language, genres, status";

/// SQLite-backed movie catalog.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Open the catalog database, creating the file and table if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                movieId INTEGER PRIMARY KEY,
                imdbId TEXT NOT NULL,
                title TEXT NOT NULL,
                overview TEXT,
                productionCompanies TEXT,
                releaseDate TEXT,
                budget INTEGER,
                revenue REAL,
                runtime REAL,
                language TEXT,
                genres TEXT,
                status TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title, movieId);
            "#,
        )?;

        // genre_match(genres, token): true when a decoded genre name contains token.
        // Rows with undecodable genres always match so mapping reports them.
        conn.create_scalar_function(
            "genre_match",
            2,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let genres: Option<String> = ctx.get(0)?;
                let token: String = ctx.get(1)?;
                Ok(decode_genres(genres.as_deref())
                    .map(|names| genre_matches(&names, &token))
                    .unwrap_or(true))
            },
        )?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Internal("catalog connection mutex poisoned".to_string()))
    }

    /// Insert or replace movies. Used to seed a catalog database.
    ///
    /// Returns the number of rows written.
    pub fn insert_movies(&self, movies: &[StoredMovie]) -> Result<u32, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut written = 0;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO movies ({MOVIE_COLUMNS}) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))?;

            for movie in movies {
                stmt.execute(params![
                    movie.movie_id,
                    &movie.imdb_id,
                    &movie.title,
                    &movie.overview,
                    &movie.production_companies,
                    &movie.release_date,
                    movie.budget,
                    movie.revenue,
                    movie.runtime,
                    &movie.language,
                    &movie.genres,
                    &movie.status,
                ])?;
                written += 1;
            }
        }

        tx.commit()?;
        Ok(written)
    }

    /// Run a paged SELECT with an optional WHERE clause.
    fn query_page(
        &self,
        filter: Option<&str>,
        mut args: Vec<Value>,
        page: PageRequest,
    ) -> Result<Page<StoredMovie>, StoreError> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies {} ORDER BY title ASC, movieId ASC LIMIT ? OFFSET ?",
            filter.map(|f| format!("WHERE {f}")).unwrap_or_default()
        );

        // SQLite integers are signed; an offset past i64::MAX cannot match any row.
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        args.push(Value::Integer(i64::from(page.size)));
        args.push(Value::Integer(offset));

        debug!(sql = %sql, page = page.page, size = page.size, "Catalog page query");

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), row_to_movie)?;

        let mut movies = Vec::new();
        for row in rows {
            movies.push(row?);
        }
        Ok(Page::new(movies))
    }
}

/// Convert a row selected with [`MOVIE_COLUMNS`] into a StoredMovie.
fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<StoredMovie> {
    Ok(StoredMovie {
        movie_id: row.get(0)?,
        imdb_id: row.get(1)?,
        title: row.get(2)?,
        overview: row.get(3)?,
        production_companies: row.get(4)?,
        release_date: row.get(5)?,
        budget: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
        revenue: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
        runtime: row.get::<_, Option<f64>>(8)?.unwrap_or(0.0),
        language: row.get(9)?,
        genres: row.get(10)?,
        status: row.get(11)?,
    })
}

impl MovieStore for SqliteMovieStore {
    fn fetch_all(&self, page: PageRequest) -> Result<Page<StoredMovie>, StoreError> {
        self.query_page(None, Vec::new(), page)
    }

    fn fetch_by_year(
        &self,
        year: i32,
        page: PageRequest,
    ) -> Result<Page<StoredMovie>, StoreError> {
        self.query_page(
            Some("CAST(substr(releaseDate, 1, 4) AS INTEGER) = ?"),
            vec![Value::Integer(i64::from(year))],
            page,
        )
    }

    fn fetch_by_genre(
        &self,
        pattern: &str,
        page: PageRequest,
    ) -> Result<Page<StoredMovie>, StoreError> {
        self.query_page(
            Some("genre_match(genres, ?)"),
            vec![Value::Text(pattern.to_string())],
            page,
        )
    }

    fn fetch_by_id(&self, movie_id: i64) -> Result<Option<StoredMovie>, StoreError> {
        let conn = self.lock()?;
        let movie = conn
            .query_row(
                &format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE movieId = ?"),
                params![movie_id],
                row_to_movie,
            )
            .optional()?;
        Ok(movie)
    }
}
