use thiserror::Error;

use crate::domain::errors::IdError;

/// Error for unknown status strings on directory records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("Invalid truck status: {0}")]
    Truck(String),

    #[error("Invalid driver status: {0}")]
    Driver(String),
}

/// Top-level error for the truck/driver directory.
#[derive(Debug, Clone, Error)]
pub enum FleetError {
    #[error("{0}")]
    InvalidId(#[from] IdError),

    #[error("{0}")]
    InvalidStatus(#[from] StatusError),

    #[error("{0} already exists")]
    DuplicateResource(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
