use thiserror::Error;

#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    InternalError(String),
    BadRequest(String),
    Unauthorized,
    PayloadTooLarge,
    PayloadUnreadable(String),
    StorageFailure(String),
}

/// Failure to durably write or read the metadata snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("code {0} is already occupied")]
    DuplicateCode(String),
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        ApplicationError::InternalError(error.to_string())
    }
}
