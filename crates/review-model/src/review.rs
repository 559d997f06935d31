//! Review actions and their client-side validation.

use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;

/// Generic message shown when the backend gives no reason for a failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// A review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Approve a registration.
    Approve,
    /// Reject a registration.
    Reject,
}

impl ReviewAction {
    /// Lowercase verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }

    /// Toast shown after the backend confirmed the action.
    pub fn success_message(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "Mentor registration approved successfully",
            ReviewAction::Reject => "Mentor registration rejected",
        }
    }

    /// Prefix for failure toasts.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "Failed to approve registration",
            ReviewAction::Reject => "Failed to reject registration",
        }
    }

    /// Failure toast text; the backend message wins when present.
    pub fn failure_message(&self, backend_message: Option<&str>) -> String {
        match backend_message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => format!("{}: {}", self.failure_prefix(), message),
            None => format!("{}. {}", self.failure_prefix(), GENERIC_FAILURE_MESSAGE),
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, trimmed, non-empty rejection reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionReason(String);

impl RejectionReason {
    /// Validate raw modal input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRejectionReason);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed reason.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a registration id before it is used in a request path.
pub fn validate_id(id: &str) -> Result<&str, ValidationError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyRegistrationId)
    } else {
        Ok(trimmed)
    }
}
