use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not registered: {0}")]
    NotRegisteredError(String),
    #[error("Unavailable: {0}")]
    UnavailableError(String),
    #[error("Transfer error: {0}")]
    TransferError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for RentalError {
    fn from(err: rocksdb::Error) -> Self {
        RentalError::InternalError(Box::new(err))
    }
}

impl From<serde_json::Error> for RentalError {
    fn from(err: serde_json::Error) -> Self {
        RentalError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;
