//! Error types for the review model.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while turning backend payloads into registrations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The record carries neither an internal id nor a registration id.
    #[error("Registration record has no id")]
    MissingId,

    /// The list payload could not be decoded at all.
    #[error("Malformed registration payload: {0}")]
    Malformed(String),

    /// Input rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Client-side validation failures. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rejection reason was empty or whitespace only.
    #[error("Please provide a reason for rejection")]
    EmptyRejectionReason,

    /// Registration id was empty.
    #[error("Registration id must not be empty")]
    EmptyRegistrationId,
}
