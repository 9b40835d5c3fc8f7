// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Index query failed: {0}")]
    IndexQuery(String),

    #[error("Malformed row for document {document_id}: {message}")]
    RowDecode {
        document_id: String,
        message: String,
    },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SearchError {
    /// True for failures reported by the index collaborator. These end the
    /// current request and are shown to the user as a single message.
    pub fn is_index_failure(&self) -> bool {
        matches!(
            self,
            SearchError::IndexUnavailable(_)
                | SearchError::IndexQuery(_)
                | SearchError::RowDecode { .. }
        )
    }
}

impl From<sqlx::Error> for SearchError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => SearchError::IndexUnavailable(err.to_string()),
            other => SearchError::IndexQuery(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_failure_classification() {
        assert!(SearchError::IndexUnavailable("refused".to_string()).is_index_failure());
        assert!(SearchError::IndexQuery("syntax".to_string()).is_index_failure());
        assert!(
            SearchError::RowDecode {
                document_id: "S100ABCD".to_string(),
                message: "bad timestamp".to_string(),
            }
            .is_index_failure()
        );
        assert!(!SearchError::Config("missing".to_string()).is_index_failure());
    }

    #[test]
    fn test_sqlx_pool_timeout_maps_to_unavailable() {
        let err: SearchError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SearchError::IndexUnavailable(_)));

        let err: SearchError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SearchError::IndexQuery(_)));
    }
}
