pub mod catalog;
pub mod config;
pub mod context;
pub mod genre;
pub mod metrics;
pub mod query;
pub mod ratings;
pub mod testing;
pub mod view;

pub use catalog::{MovieStore, Page, PageRequest, SqliteMovieStore, StoreError, StoredMovie};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    RatingsConfig, SanitizedConfig, ServerConfig,
};
pub use context::RequestContext;
pub use genre::{decode_genres, encode_genres, genre_matches, GenreError};
pub use query::{MovieQueryService, QueryError, MAX_YEAR, MIN_YEAR};
pub use ratings::{
    apply_ratings, EnrichmentOutcome, HttpRatingsClient, RatingEnricher, RatingRecord,
    RatingsError, RatingsSource, CLIENT_REF_ID_HEADER,
};
pub use view::{to_view, MovieView, DEFAULT_RATING};
