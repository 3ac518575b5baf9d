//! Codec for the genre column.
//!
//! Genres are stored as a JSON array of objects, e.g.
//! `[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]`.
//! Only `name` is meaningful to the catalog; other fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when the stored genre value cannot be decoded.
#[derive(Debug, Error)]
pub enum GenreError {
    #[error("Malformed genre data '{raw}': {source}")]
    Malformed {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Genre entry {index} in '{raw}' has no usable name")]
    InvalidName { raw: String, index: usize },

    #[error("Failed to encode genres: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct StoredGenreEntry {
    name: Value,
}

#[derive(Debug, Serialize)]
struct GenreEntry<'a> {
    name: &'a str,
}

/// Decode a stored genre value into its ordered list of names.
///
/// Order and duplicates are preserved. A NULL column is an empty list; any
/// present value, including a blank one, must be a JSON array of objects
/// with a `name`. Scalar names are read as text (`28` becomes `"28"`).
pub fn decode_genres(raw: Option<&str>) -> Result<Vec<String>, GenreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let entries: Vec<StoredGenreEntry> =
        serde_json::from_str(raw).map_err(|source| GenreError::Malformed {
            raw: raw.to_string(),
            source,
        })?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry.name {
            Value::String(name) => Ok(name),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(GenreError::InvalidName {
                raw: raw.to_string(),
                index,
            }),
        })
        .collect()
}

/// Check whether any genre name contains `token`, ignoring case.
///
/// Partial names match too: "Fi" matches "Science Fiction".
pub fn genre_matches<S: AsRef<str>>(names: &[S], token: &str) -> bool {
    let token = token.to_lowercase();
    names
        .iter()
        .any(|name| name.as_ref().to_lowercase().contains(&token))
}

/// Encode genre names into the stored representation.
pub fn encode_genres<S: AsRef<str>>(names: &[S]) -> Result<String, GenreError> {
    let entries: Vec<GenreEntry<'_>> = names
        .iter()
        .map(|name| GenreEntry {
            name: name.as_ref(),
        })
        .collect();

    serde_json::to_string(&entries).map_err(GenreError::Encode)
}
