//! Errors raised when operator input is rejected.

use thiserror::Error;

/// Rejected roster input. Every variant is recoverable: the roster is left
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid microphone number: {0:?}")]
    InvalidNumber(String),

    #[error("Microphone type cannot be empty")]
    EmptyKind,

    #[error("Microphone number {0} is already registered")]
    DuplicateNumber(u32),

    #[error("Invalid microphone position: {input:?} (roster has {len})")]
    InvalidPosition { input: String, len: usize },

    #[error("No microphone with number {0}")]
    UnknownNumber(u32),

    #[error("Owner name cannot be empty")]
    EmptyOwner,
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
