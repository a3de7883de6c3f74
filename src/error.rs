//! Error taxonomy for dataset loading, store connection, and batch uploads.
//!
//! Everything here is fatal to the run except [`FeedError::Upload`], which the
//! simulator catches per batch and skips.

use camino::Utf8PathBuf;

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("dataset not found: {path}")]
    DatasetNotFound { path: Utf8PathBuf },

    #[error("failed to parse dataset {path}: {source}")]
    DatasetParse {
        path: Utf8PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("missing credentials: {0} is not set")]
    MissingCredentials(String),

    #[error("failed to connect to store: {source}")]
    Connection {
        #[source]
        source: object_store::Error,
    },

    #[error("failed to serialize batch: {source}")]
    Serialize {
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("failed to upload {name}: {source}")]
    Upload {
        name: String,
        #[source]
        source: object_store::Error,
    },
}
