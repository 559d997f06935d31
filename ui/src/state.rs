//! Global application state

use crate::types::{Connection, Toast, ToastKind};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentor_review_model::{InFlightGuard, InFlightSet};

const STORAGE_KEY_TOKEN: &str = "mentor_review_token";
const STORAGE_KEY_CONNECTION: &str = "mentor_review_connection";
const TOAST_TTL_MS: u32 = 4_000;

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Admin bearer token
    pub token: RwSignal<Option<String>>,
    /// Backend base URL, routes and reject body setting
    pub connection: RwSignal<Connection>,
    /// Ids with an approve/reject call pending
    pub in_flight: InFlightSet,
    /// Reactive mirror of `in_flight` for rendering
    pub busy: RwSignal<Vec<String>>,
    /// Visible toasts
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
}

impl AppState {
    pub fn new() -> Self {
        let token: Option<String> = LocalStorage::get(STORAGE_KEY_TOKEN).ok();
        let connection = LocalStorage::get::<Connection>(STORAGE_KEY_CONNECTION)
            .ok()
            .filter(|c| c.validate().is_ok())
            .unwrap_or_default();

        Self {
            token: RwSignal::new(token),
            connection: RwSignal::new(connection),
            in_flight: InFlightSet::new(),
            busy: RwSignal::new(vec![]),
            toasts: RwSignal::new(vec![]),
            next_toast: StoredValue::new(1),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        match &token {
            Some(t) => {
                let _ = LocalStorage::set(STORAGE_KEY_TOKEN, t);
            }
            None => LocalStorage::delete(STORAGE_KEY_TOKEN),
        }
        self.token.set(token);
    }

    /// Validate, persist and apply new connection settings.
    pub fn set_connection(&self, connection: Connection) -> Result<(), String> {
        let connection = connection.normalized();
        connection.validate()?;
        if let Err(e) = LocalStorage::set(STORAGE_KEY_CONNECTION, &connection) {
            tracing::warn!(error = %e, "Connection settings not persisted");
        }
        self.connection.set(connection);
        Ok(())
    }

    /// Claim `id` for an action; `None` when one is already pending.
    pub fn begin_action(&self, id: &str) -> Option<InFlightGuard> {
        let guard = self.in_flight.try_acquire(id);
        self.sync_busy();
        guard
    }

    /// Refresh the reactive busy list from the in-flight set.
    pub fn sync_busy(&self) {
        self.busy.set(self.in_flight.snapshot());
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.with(|busy| busy.iter().any(|b| b == id))
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
