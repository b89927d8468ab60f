use thiserror::Error;

use crate::domain::errors::IdError;
use crate::domain::fleet::errors::FleetError;
use crate::domain::trip::models::TripStatus;

/// Error for TripStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TripStatusError {
    #[error("Invalid trip status: {0}")]
    Unknown(String),
}

/// Top-level error for trip lifecycle operations
#[derive(Debug, Clone, Error)]
pub enum TripError {
    // Input errors
    #[error("{0}")]
    InvalidId(#[from] IdError),

    #[error("{0}")]
    InvalidStatus(#[from] TripStatusError),

    #[error("Status is required")]
    MissingStatus,

    #[error("{0}")]
    Validation(String),

    // Domain-level errors
    #[error("Truck not found")]
    TruckNotFound(String),

    #[error("Driver not found")]
    DriverNotFound(String),

    #[error("Trip not found")]
    TripNotFound(String),

    #[error("Driver profile not found")]
    DriverProfileNotFound(String),

    #[error("Access denied. Trip is assigned to another driver.")]
    NotTripOwner,

    #[error("Cannot change trip status from {from} to {to}")]
    InvalidTransition { from: TripStatus, to: TripStatus },

    #[error("Trip number {0} already exists")]
    DuplicateTripNumber(String),

    // Infrastructure errors
    #[error("{0}")]
    Directory(#[from] FleetError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TripError {
    fn from(err: anyhow::Error) -> Self {
        TripError::Unknown(err.to_string())
    }
}
