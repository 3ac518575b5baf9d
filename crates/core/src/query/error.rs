use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by catalog queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The caller supplied invalid parameters.
    #[error("{0}")]
    Validation(String),

    /// The query was valid but matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// The catalog failed or returned data that could not be mapped.
    /// The message is safe to show to clients; the source is not.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QueryError {
    pub fn upstream(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        QueryError::Upstream {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Validation(_) => "invalid",
            QueryError::NotFound(_) => "not_found",
            QueryError::Upstream { .. } => "upstream_error",
            QueryError::Internal(_) => "internal_error",
        }
    }
}
