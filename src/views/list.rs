//! Registration List View model.

use super::{
    fetch_registrations, refuse_settled, settle_failure, ActionOutcome, Notifications,
    PROCESSING_LABEL,
};
use crate::review::ReviewCoordinator;
use crate::types::AppError;
use crate::utils::logging::error_label;
use crate::utils::toml_config::DisplayConfig;
use mentor_review_model::{
    NormalizeOptions, Page, Registration, RegistrationQuery, ReviewAction, ReviewStatus,
    StatusCounts, StatusFilter,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Fetch state of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum ListState {
    Loading,
    Ready,
    /// Fetch failed; no automatic retry.
    Failed(String),
}

/// Approve/Reject controls of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowControls {
    /// Row is not pending; no controls.
    Hidden,
    /// Controls shown and enabled.
    Available,
    /// An action for this row is pending; controls disabled.
    Processing,
}

impl RowControls {
    /// Whether the row shows approve/reject buttons at all.
    pub fn is_visible(&self) -> bool {
        !matches!(self, RowControls::Hidden)
    }

    /// Whether the buttons accept clicks.
    pub fn is_enabled(&self) -> bool {
        matches!(self, RowControls::Available)
    }

    /// Button text override while processing.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            RowControls::Processing => Some(PROCESSING_LABEL),
            _ => None,
        }
    }
}

/// Everything a renderer needs for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    /// Internal id; actions are issued against it.
    pub id: String,
    pub registration_id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: String,
    pub status: ReviewStatus,
    /// Application date in the configured format.
    pub applied_on: String,
    pub controls: RowControls,
}

#[derive(Debug)]
struct ListInner {
    state: ListState,
    registrations: Vec<Registration>,
    query: RegistrationQuery,
}

/// Headless model of the registration list page.
#[derive(Clone)]
pub struct RegistrationListView {
    coordinator: ReviewCoordinator,
    options: NormalizeOptions,
    date_format: String,
    notifications: Notifications,
    inner: Arc<RwLock<ListInner>>,
    cancel: CancellationToken,
}

impl RegistrationListView {
    /// Create a view in the `Loading` state. Call [`load`](Self::load) next.
    pub fn new(coordinator: ReviewCoordinator, display: &DisplayConfig) -> Self {
        Self {
            coordinator,
            options: display.normalize_options(),
            date_format: display.date_format.clone(),
            notifications: Notifications::new(),
            inner: Arc::new(RwLock::new(ListInner {
                state: ListState::Loading,
                registrations: Vec::new(),
                query: RegistrationQuery::default().with_page_size(display.page_size),
            })),
            cancel: CancellationToken::new(),
        }
    }

    /// Share a notification queue with other views.
    pub fn with_notifications(mut self, notifications: Notifications) -> Self {
        self.notifications = notifications;
        self
    }

    /// Initial fetch.
    pub async fn load(&self) -> ListState {
        self.reload().await
    }

    /// Fetch the whole collection again and recompute every status.
    pub async fn reload(&self) -> ListState {
        if self.cancel.is_cancelled() {
            return self.state();
        }
        self.inner.write().state = ListState::Loading;

        let result =
            fetch_registrations(self.coordinator.backend(), &self.options, &self.cancel).await;

        if self.cancel.is_cancelled() {
            return self.state();
        }
        let mut inner = self.inner.write();
        match result {
            Ok(registrations) => {
                info!(count = registrations.len(), "Registration list loaded");
                inner.registrations = registrations;
                inner.state = ListState::Ready;
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                warn!(error_type = error_label(&e), error = %e, "Registration list failed to load");
                inner.state = ListState::Failed(e.user_message());
            }
        }
        inner.state.clone()
    }

    /// Current fetch state.
    pub fn state(&self) -> ListState {
        self.inner.read().state.clone()
    }

    /// Every fetched registration, unfiltered.
    pub fn registrations(&self) -> Vec<Registration> {
        self.inner.read().registrations.clone()
    }

    /// Look up a fetched registration by either id.
    pub fn find(&self, key: &str) -> Option<Registration> {
        self.inner
            .read()
            .registrations
            .iter()
            .find(|r| r.matches_id(key))
            .cloned()
    }

    /// Per-status counts for the filter tabs.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.inner.read().registrations)
    }

    /// Active filter, search term and page.
    pub fn query(&self) -> RegistrationQuery {
        self.inner.read().query.clone()
    }

    /// Switch the status tab; resets to the first page.
    pub fn set_filter(&self, filter: StatusFilter) {
        let mut inner = self.inner.write();
        inner.query = inner.query.clone().with_status(filter).with_page(1);
    }

    /// Change the search term; resets to the first page.
    pub fn set_search(&self, term: &str) {
        let mut inner = self.inner.write();
        inner.query = inner.query.clone().with_search(term).with_page(1);
    }

    /// Jump to `page`; out-of-range pages are clamped when served.
    pub fn set_page(&self, page: usize) {
        let mut inner = self.inner.write();
        inner.query = inner.query.clone().with_page(page);
    }

    /// The current page under the active filter and search.
    pub fn page(&self) -> Page<Registration> {
        let inner = self.inner.read();
        let page = inner.query.apply(&inner.registrations);
        Page {
            items: page.items.into_iter().cloned().collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }

    /// Render-ready rows for the current page.
    pub fn rows(&self) -> Vec<ListRow> {
        self.page()
            .items
            .into_iter()
            .map(|r| ListRow {
                controls: self.controls_for(&r),
                applied_on: Registration::display_date(r.applied_at.as_ref(), &self.date_format),
                status: r.status(),
                id: r.id,
                registration_id: r.registration_id,
                name: r.name,
                email: r.email,
                avatar_url: r.avatar_url,
            })
            .collect()
    }

    /// Controls for the row identified by `key` (either id).
    pub fn row_controls(&self, key: &str) -> RowControls {
        match self.find(key) {
            Some(registration) => self.controls_for(&registration),
            None => RowControls::Hidden,
        }
    }

    fn controls_for(&self, registration: &Registration) -> RowControls {
        if !registration.is_actionable() {
            RowControls::Hidden
        } else if self.coordinator.is_busy(&registration.id) {
            RowControls::Processing
        } else {
            RowControls::Available
        }
    }

    /// Approve the row with id `id`, then reload.
    ///
    /// Rows that are not pending are refused without a request.
    pub async fn approve(&self, id: &str) -> ActionOutcome {
        let registration = match self.pending_row(id) {
            Ok(registration) => registration,
            Err(outcome) => return outcome,
        };
        let result = self.coordinator.approve(&registration.id).await;
        self.finish(ReviewAction::Approve, result.map(|_| ())).await
    }

    /// Reject the row with id `id`, then reload.
    ///
    /// Rows that are not pending are refused without a request.
    pub async fn reject(&self, id: &str, reason: &str) -> ActionOutcome {
        let registration = match self.pending_row(id) {
            Ok(registration) => registration,
            Err(outcome) => return outcome,
        };
        let result = self.coordinator.reject(&registration.id, reason).await;
        self.finish(ReviewAction::Reject, result.map(|_| ())).await
    }

    fn pending_row(&self, id: &str) -> Result<Registration, ActionOutcome> {
        match self.find(id) {
            Some(registration) if registration.is_actionable() => Ok(registration),
            Some(registration) => Err(refuse_settled(&registration, &self.notifications)),
            None => Err(ActionOutcome::Invalid(format!(
                "Registration {} is not in the list",
                id.trim()
            ))),
        }
    }

    async fn finish(&self, action: ReviewAction, result: crate::types::Result<()>) -> ActionOutcome {
        if self.cancel.is_cancelled() {
            return ActionOutcome::Cancelled;
        }
        match result {
            Ok(()) => {
                self.reload().await;
                if self.cancel.is_cancelled() {
                    return ActionOutcome::Cancelled;
                }
                self.notifications.success(action.success_message());
                ActionOutcome::Completed
            }
            Err(e) => settle_failure(action, e, &self.notifications),
        }
    }

    /// Toasts raised by this view.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// The coordinator shared with other views.
    pub fn coordinator(&self) -> &ReviewCoordinator {
        &self.coordinator
    }

    /// Abandon pending fetches; no state is written afterwards.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}
