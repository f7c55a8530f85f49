use crate::model::CollectionId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Upstream tables could not be loaded. Retrying later may succeed.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Duplicate active collection id: {0}")]
    DuplicateCollection(CollectionId),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("No catalog snapshot installed; run preprocessing first")]
    NotPreprocessed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether the caller may retry the same operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::DataUnavailable(_) | Error::NotPreprocessed)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
