//! Headless view models
//!
//! [`RegistrationListView`] and [`RegistrationDetailView`] hold everything a
//! renderer needs (fetch state, filters, busy rows, modal state, toasts)
//! without depending on any UI toolkit. The CLI drives them directly and
//! the tests assert on them.
//!
//! Every view owns a [`CancellationToken`]. `teardown()` cancels it: a
//! pending fetch is abandoned and no state is written afterwards.

pub mod detail;
pub mod list;
pub mod notify;

pub use detail::{DetailState, RegistrationDetailView, RejectModal, StatusCallback, StatusUpdate};
pub use list::{ListRow, ListState, RegistrationListView, RowControls};
pub use notify::{Notification, NotificationKind, Notifications};

use crate::api::RegistrationBackend;
use crate::types::{AppError, Result};
use mentor_review_model::{normalize_all, NormalizeOptions, Registration, ReviewAction};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Label shown on a row whose action is pending.
pub const PROCESSING_LABEL: &str = "Processing…";

/// How a view-level approve/reject attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend confirmed; the view re-fetched.
    Completed,
    /// Backend or network failure; an error toast carries this message.
    Failed(String),
    /// Another action for the same registration was still pending.
    Suppressed,
    /// Client-side validation failed; nothing was sent.
    Invalid(String),
    /// The view was torn down before the action settled.
    Cancelled,
}

impl ActionOutcome {
    /// True only when the backend confirmed the action.
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }
}

/// Refuse an action on a registration that is no longer pending.
///
/// Nothing is sent; the error toast names the status it already has.
pub(crate) fn refuse_settled(
    registration: &Registration,
    notifications: &Notifications,
) -> ActionOutcome {
    let message = format!(
        "Registration {} is already {}",
        registration.registration_id,
        registration.status().label().to_lowercase()
    );
    notifications.error(message.clone());
    ActionOutcome::Invalid(message)
}

/// Map a failed coordinator call to an outcome, queueing the error toast.
pub(crate) fn settle_failure(
    action: ReviewAction,
    error: AppError,
    notifications: &Notifications,
) -> ActionOutcome {
    match error {
        AppError::InFlight(_) => ActionOutcome::Suppressed,
        AppError::Cancelled => ActionOutcome::Cancelled,
        AppError::Validation(v) => {
            let message = v.to_string();
            notifications.error(message.clone());
            ActionOutcome::Invalid(message)
        }
        other => {
            let message = action.failure_message(other.backend_message());
            notifications.error(message.clone());
            ActionOutcome::Failed(message)
        }
    }
}

/// Fetch and normalize the whole collection, abandoning it on cancel.
pub(crate) async fn fetch_registrations(
    backend: &Arc<dyn RegistrationBackend>,
    options: &NormalizeOptions,
    cancel: &CancellationToken,
) -> Result<Vec<Registration>> {
    let raw = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Fetch abandoned after teardown");
            return Err(AppError::Cancelled);
        }
        result = backend.list_registrations() => result?,
    };
    Ok(normalize_all(raw, options))
}
