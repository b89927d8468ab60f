use thiserror::Error;

/// Error for identifier parsing failures.
///
/// Shared by every UUID-backed identifier in the domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid {kind} id: {value}")]
    InvalidFormat { kind: &'static str, value: String },
}
