//! Registration Detail View model.

use super::{fetch_registrations, refuse_settled, settle_failure, ActionOutcome, Notifications};
use crate::review::ReviewCoordinator;
use crate::types::AppError;
use crate::utils::logging::error_label;
use crate::utils::toml_config::DisplayConfig;
use mentor_review_model::{
    NormalizeOptions, Registration, RejectionReason, ReviewAction, ReviewStatus,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fetch state of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Fetch in flight and nothing loaded yet.
    Loading,
    /// The matching registration.
    Ready(Registration),
    /// No registration matches the key. Terminal until the user navigates back.
    NotFound,
    /// First fetch failed; carries the page message.
    Failed(String),
}

/// Payload handed to the status-changed callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    /// Internal id the action was issued for.
    pub id: String,
    /// Human-facing registration id.
    pub registration_id: String,
    pub action: ReviewAction,
    /// Status observed after the re-fetch; `None` when the re-fetch failed.
    pub status: Option<ReviewStatus>,
}

/// Called after a confirmed action and its re-fetch.
pub type StatusCallback = Arc<dyn Fn(StatusUpdate) + Send + Sync>;

/// State of the reject confirmation modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectModal {
    pub open: bool,
    /// Reason as typed, untrimmed.
    pub reason: String,
    /// Validation message shown inside the modal.
    pub error: Option<String>,
}

#[derive(Debug)]
struct DetailInner {
    state: DetailState,
    modal: RejectModal,
}

/// Headless model of the registration detail page.
#[derive(Clone)]
pub struct RegistrationDetailView {
    key: String,
    coordinator: ReviewCoordinator,
    options: NormalizeOptions,
    date_format: String,
    notifications: Notifications,
    on_status_update: Option<StatusCallback>,
    inner: Arc<RwLock<DetailInner>>,
    cancel: CancellationToken,
}

impl RegistrationDetailView {
    /// `registration_id` may be the human-facing registration id or the
    /// internal id.
    pub fn new(
        coordinator: ReviewCoordinator,
        display: &DisplayConfig,
        registration_id: impl Into<String>,
    ) -> Self {
        Self {
            key: registration_id.into().trim().to_string(),
            coordinator,
            options: display.normalize_options(),
            date_format: display.date_format.clone(),
            notifications: Notifications::new(),
            on_status_update: None,
            inner: Arc::new(RwLock::new(DetailInner {
                state: DetailState::Loading,
                modal: RejectModal::default(),
            })),
            cancel: CancellationToken::new(),
        }
    }

    /// Share a notification queue with other views.
    pub fn with_notifications(mut self, notifications: Notifications) -> Self {
        self.notifications = notifications;
        self
    }

    /// Register the status-changed callback.
    pub fn on_status_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(StatusUpdate) + Send + Sync + 'static,
    {
        self.on_status_update = Some(Arc::new(callback));
        self
    }

    /// The key this view was opened with.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Initial fetch.
    pub async fn load(&self) -> DetailState {
        self.reload().await
    }

    /// Fetch the collection and select the matching registration.
    pub async fn reload(&self) -> DetailState {
        if self.cancel.is_cancelled() {
            return self.state();
        }
        {
            let mut inner = self.inner.write();
            if !matches!(inner.state, DetailState::Ready(_)) {
                inner.state = DetailState::Loading;
            }
        }

        let result =
            fetch_registrations(self.coordinator.backend(), &self.options, &self.cancel).await;

        if self.cancel.is_cancelled() {
            return self.state();
        }
        let mut inner = self.inner.write();
        match result {
            Ok(registrations) => {
                inner.state = match registrations.into_iter().find(|r| r.matches_id(&self.key)) {
                    Some(registration) => {
                        debug!(registration_id = %registration.registration_id, status = %registration.status(), "Registration loaded");
                        DetailState::Ready(registration)
                    }
                    None => {
                        info!(key = %self.key, "Registration not found");
                        DetailState::NotFound
                    }
                };
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                warn!(key = %self.key, error_type = error_label(&e), error = %e, "Registration failed to load");
                inner.state = DetailState::Failed(e.user_message());
            }
        }
        inner.state.clone()
    }

    /// Current fetch state.
    pub fn state(&self) -> DetailState {
        self.inner.read().state.clone()
    }

    /// The loaded registration, if any.
    pub fn registration(&self) -> Option<Registration> {
        match &self.inner.read().state {
            DetailState::Ready(registration) => Some(registration.clone()),
            _ => None,
        }
    }

    /// Format one of the registration's timestamps.
    pub fn display_date(&self, value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
        Registration::display_date(value, &self.date_format)
    }

    /// Whether an action for this registration is pending.
    pub fn is_busy(&self) -> bool {
        self.registration()
            .is_some_and(|r| self.coordinator.is_busy(&r.id))
    }

    /// Approve is offered only for a loaded, pending, idle registration.
    pub fn approve_enabled(&self) -> bool {
        self.registration()
            .is_some_and(|r| r.is_actionable() && !self.coordinator.is_busy(&r.id))
    }

    /// Reject follows the same rule as approve.
    pub fn reject_enabled(&self) -> bool {
        self.approve_enabled()
    }

    /// Approve the loaded registration, then re-fetch it.
    ///
    /// A registration that is not pending is refused without a request.
    pub async fn approve(&self) -> ActionOutcome {
        let Some(registration) = self.registration() else {
            return ActionOutcome::Invalid("Registration is not loaded".to_string());
        };
        if !registration.is_actionable() {
            return refuse_settled(&registration, &self.notifications);
        }
        let result = self.coordinator.approve(&registration.id).await;
        self.finish(ReviewAction::Approve, &registration, result.map(|_| ()))
            .await
    }

    /// Snapshot of the reject modal.
    pub fn reject_modal(&self) -> RejectModal {
        self.inner.read().modal.clone()
    }

    /// Open the reject confirmation modal with an empty reason.
    ///
    /// Returns `false` and leaves the modal closed unless reject is enabled.
    pub fn open_reject_modal(&self) -> bool {
        if self.cancel.is_cancelled() || !self.reject_enabled() {
            return false;
        }
        self.inner.write().modal = RejectModal {
            open: true,
            ..RejectModal::default()
        };
        true
    }

    /// Update the reason being typed; clears a previous validation message.
    pub fn set_reject_reason(&self, reason: &str) {
        let mut inner = self.inner.write();
        inner.modal.reason = reason.to_string();
        inner.modal.error = None;
    }

    /// Dismiss the modal and forget the typed reason.
    pub fn close_reject_modal(&self) {
        self.inner.write().modal = RejectModal::default();
    }

    /// Confirm the modal.
    ///
    /// A blank reason keeps the modal open with a validation message and
    /// issues no request. So does a closed modal or a registration that is
    /// no longer pending.
    pub async fn confirm_reject(&self) -> ActionOutcome {
        let RejectModal { open, reason, .. } = self.reject_modal();
        if !open {
            return ActionOutcome::Invalid("Reject confirmation is not open".to_string());
        }
        if let Err(e) = RejectionReason::parse(&reason) {
            let message = e.to_string();
            self.inner.write().modal.error = Some(message.clone());
            return ActionOutcome::Invalid(message);
        }
        let Some(registration) = self.registration() else {
            return ActionOutcome::Invalid("Registration is not loaded".to_string());
        };
        if !registration.is_actionable() {
            self.close_reject_modal();
            return refuse_settled(&registration, &self.notifications);
        }

        let result = self.coordinator.reject(&registration.id, &reason).await;
        let outcome = self
            .finish(ReviewAction::Reject, &registration, result.map(|_| ()))
            .await;
        if outcome.is_completed() {
            self.close_reject_modal();
        }
        outcome
    }

    /// Re-fetch, then callback, then success toast.
    async fn finish(
        &self,
        action: ReviewAction,
        registration: &Registration,
        result: crate::types::Result<()>,
    ) -> ActionOutcome {
        if self.cancel.is_cancelled() {
            return ActionOutcome::Cancelled;
        }
        if let Err(e) = result {
            return settle_failure(action, e, &self.notifications);
        }

        let status = match self.reload().await {
            DetailState::Ready(fresh) => Some(fresh.status()),
            _ => None,
        };
        if self.cancel.is_cancelled() {
            return ActionOutcome::Cancelled;
        }

        if let Some(callback) = &self.on_status_update {
            callback(StatusUpdate {
                id: registration.id.clone(),
                registration_id: registration.registration_id.clone(),
                action,
                status,
            });
        }
        self.notifications.success(action.success_message());
        ActionOutcome::Completed
    }

    /// Toasts raised by this view.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Abandon pending fetches; no state is written afterwards.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}
