//! Review Action Coordinator
//!
//! Issues approve/reject calls against the backend while guaranteeing at
//! most one in-flight action per registration id. The coordinator never
//! touches view state; callers re-fetch after a confirmed action.

use crate::api::RegistrationBackend;
use crate::types::{ActionAck, AppError, Result};
use crate::utils::logging::error_label;
use mentor_review_model::review::validate_id;
use mentor_review_model::{InFlightSet, RejectionReason, ReviewAction};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A validated action, ready to send.
enum ActionRequest {
    Approve,
    Reject(RejectionReason),
}

impl ActionRequest {
    fn action(&self) -> ReviewAction {
        match self {
            ActionRequest::Approve => ReviewAction::Approve,
            ActionRequest::Reject(_) => ReviewAction::Reject,
        }
    }
}

/// Coordinates review actions for any number of views.
///
/// Cloning is cheap and clones share the backend and the in-flight set, so
/// a list view and a detail view built from the same coordinator see each
/// other's busy rows.
#[derive(Clone)]
pub struct ReviewCoordinator {
    backend: Arc<dyn RegistrationBackend>,
    in_flight: InFlightSet,
}

impl ReviewCoordinator {
    /// Create a coordinator with an empty in-flight set.
    pub fn new(backend: Arc<dyn RegistrationBackend>) -> Self {
        Self {
            backend,
            in_flight: InFlightSet::new(),
        }
    }

    /// The backend used for actions and fetches.
    pub fn backend(&self) -> &Arc<dyn RegistrationBackend> {
        &self.backend
    }

    /// The shared in-flight set.
    pub fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }

    /// Whether an action for `id` is currently pending.
    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight.contains(id.trim())
    }

    /// Approve a registration.
    ///
    /// Returns [`AppError::InFlight`] without touching the network when an
    /// action for the same id is already pending.
    pub async fn approve(&self, id: &str) -> Result<ActionAck> {
        let id = validate_id(id)?;
        self.run(id, ActionRequest::Approve).await
    }

    /// Reject a registration.
    ///
    /// The reason is validated before anything else; an empty or
    /// whitespace-only reason yields [`AppError::Validation`] and no call.
    pub async fn reject(&self, id: &str, reason: &str) -> Result<ActionAck> {
        let reason = RejectionReason::parse(reason)?;
        let id = validate_id(id)?;
        self.run(id, ActionRequest::Reject(reason)).await
    }

    async fn run(&self, id: &str, request: ActionRequest) -> Result<ActionAck> {
        let action = request.action();
        let Some(guard) = self.in_flight.try_acquire(id) else {
            warn!(registration_id = %id, %action, "Duplicate review action suppressed");
            return Err(AppError::InFlight(id.to_string()));
        };

        let action_id = Uuid::new_v4();
        let started = Instant::now();
        debug!(%action_id, registration_id = %id, %action, "Review action started");

        let result = match &request {
            ActionRequest::Approve => self.backend.approve_registration(guard.id()).await,
            ActionRequest::Reject(reason) => {
                self.backend.reject_registration(guard.id(), reason).await
            }
        };
        drop(guard);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(
                %action_id,
                registration_id = %id,
                %action,
                elapsed_ms,
                "Review action confirmed"
            ),
            Err(e) => error!(
                %action_id,
                registration_id = %id,
                %action,
                elapsed_ms,
                error_type = error_label(e),
                error = %e,
                "Review action failed"
            ),
        }
        result
    }
}

impl std::fmt::Debug for ReviewCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewCoordinator")
            .field("in_flight", &self.in_flight.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockRegistrationBackend;
    use mentor_review_model::ValidationError;

    fn coordinator(mock: MockRegistrationBackend) -> ReviewCoordinator {
        ReviewCoordinator::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_approve_calls_backend_once() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_approve_registration()
            .withf(|id| id == "R1")
            .times(1)
            .returning(|_| {
                Ok(ActionAck {
                    success: Some(true),
                    message: None,
                })
            });

        let coordinator = coordinator(mock);
        let ack = coordinator.approve("R1").await.unwrap();
        assert_eq!(ack.success, Some(true));
        assert!(!coordinator.is_busy("R1"));
    }

    #[tokio::test]
    async fn test_blank_reason_never_reaches_backend() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_reject_registration().never();

        let coordinator = coordinator(mock);
        for reason in ["", "   ", "\n\t"] {
            let err = coordinator.reject("R1", reason).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Validation(ValidationError::EmptyRejectionReason)
            ));
        }
        assert!(coordinator.in_flight().is_empty());
    }

    #[tokio::test]
    async fn test_reject_passes_trimmed_reason() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_reject_registration()
            .withf(|id, reason| id == "R1" && reason.as_str() == "Incomplete KYC")
            .times(1)
            .returning(|_, _| Ok(ActionAck::default()));

        let coordinator = coordinator(mock);
        coordinator.reject("R1", "  Incomplete KYC  ").await.unwrap();
    }

    #[tokio::test]
    async fn test_backend_failure_releases_busy_flag() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_approve_registration().times(2).returning(|_| {
            Err(AppError::Backend {
                status: 409,
                message: Some("Already processed".to_string()),
            })
        });

        let coordinator = coordinator(mock);
        let err = coordinator.approve("R1").await.unwrap_err();
        assert_eq!(err.backend_message(), Some("Already processed"));
        assert!(!coordinator.is_busy("R1"));

        // a retry is allowed once the first call has settled
        assert!(coordinator.approve("R1").await.is_err());
    }

    #[tokio::test]
    async fn test_held_id_is_suppressed() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_approve_registration().never();

        let coordinator = coordinator(mock);
        let _guard = coordinator.in_flight().try_acquire("R1").unwrap();
        assert!(coordinator.is_busy("R1"));

        let err = coordinator.approve("R1").await.unwrap_err();
        assert!(matches!(err, AppError::InFlight(ref id) if id == "R1"));
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected() {
        let mut mock = MockRegistrationBackend::new();
        mock.expect_approve_registration().never();

        let err = coordinator(mock).approve("  ").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyRegistrationId)
        ));
    }
}
