//! Backend contract for the review workflow
//!
//! The list endpoint is the only read path: there is no single-record
//! endpoint, so detail lookups fetch the whole collection and select.

use crate::types::{ActionAck, Result};
use async_trait::async_trait;
use mentor_review_model::{RawRegistration, RejectionReason};

/// Operations the review workflow needs from the backend.
///
/// Implementations must be cheap to share behind an `Arc`; views and the
/// coordinator hold the same instance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Fetch every registration as raw backend records.
    async fn list_registrations(&self) -> Result<Vec<RawRegistration>>;

    /// Approve the registration with the given internal id.
    async fn approve_registration(&self, id: &str) -> Result<ActionAck>;

    /// Reject the registration with the given internal id.
    ///
    /// The reason has already been validated. Whether it is transmitted is
    /// up to the implementation.
    async fn reject_registration(&self, id: &str, reason: &RejectionReason) -> Result<ActionAck>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "registration backend".to_string()
    }
}
