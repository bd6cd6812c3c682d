use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Progress store failed")]
    Store(#[from] StoreError),
}

/// Failures of the persistence boundary. Malformed stored JSON is the one
/// condition gameplay surfaces to the caller; everything else in the round
/// engine is a silent no-op.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Stored document is not valid JSON")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
