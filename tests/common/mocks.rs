//! In-memory registration backend for testing.
//!
//! Holds raw JSON records so approve/reject flip the same flags the real
//! backend flips, and the next list call observes the change through the
//! normal decode and normalize path.

use async_trait::async_trait;
use mentor_review::model::{RawRegistration, RegistrationList, RejectionReason};
use mentor_review::types::{ActionAck, AppError, Result};
use mentor_review::RegistrationBackend;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Mock backend with call counters, failure modes and gated responses.
///
/// # Examples
///
/// ```ignore
/// let backend = MockBackend::new(vec![pending_record("R1", "Asha Rao")]);
/// backend.fail_actions_with(409, Some("Already processed"));
/// let gated = MockBackend::new(records).with_action_gate();
/// ```
#[derive(Default)]
pub struct MockBackend {
    records: Mutex<Vec<Value>>,
    list_calls: AtomicUsize,
    approve_calls: AtomicUsize,
    reject_calls: AtomicUsize,
    list_failure: Mutex<Option<AppError>>,
    action_failure: Mutex<Option<(u16, Option<String>)>>,
    last_reason: Mutex<Option<String>>,
    action_gate: Option<Arc<Semaphore>>,
    list_gate: Option<Arc<Semaphore>>,
    /// Signalled whenever a gated call has entered the backend.
    pub entered: Arc<Notify>,
}

impl MockBackend {
    /// Create a backend serving the given raw records.
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Create a backend whose list call fails with a network error.
    pub fn failing() -> Self {
        let backend = Self::default();
        *backend.list_failure.lock() = Some(AppError::Network("connection refused".to_string()));
        backend
    }

    /// Hold every approve/reject until [`release_actions`](Self::release_actions).
    pub fn with_action_gate(mut self) -> Self {
        self.action_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Hold every list call until [`release_lists`](Self::release_lists).
    pub fn with_list_gate(mut self) -> Self {
        self.list_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn release_actions(&self, count: usize) {
        if let Some(gate) = &self.action_gate {
            gate.add_permits(count);
        }
    }

    pub fn release_lists(&self, count: usize) {
        if let Some(gate) = &self.list_gate {
            gate.add_permits(count);
        }
    }

    /// Make approve/reject answer with a backend error.
    pub fn fail_actions_with(&self, status: u16, message: Option<&str>) {
        *self.action_failure.lock() = Some((status, message.map(str::to_string)));
    }

    /// Make list calls fail from now on.
    pub fn fail_lists_with(&self, error: AppError) {
        *self.list_failure.lock() = Some(error);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn approve_calls(&self) -> usize {
        self.approve_calls.load(Ordering::SeqCst)
    }

    pub fn reject_calls(&self) -> usize {
        self.reject_calls.load(Ordering::SeqCst)
    }

    pub fn last_reason(&self) -> Option<String> {
        self.last_reason.lock().clone()
    }

    async fn pass_gate(&self, gate: &Option<Arc<Semaphore>>) {
        if let Some(gate) = gate {
            self.entered.notify_one();
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }

    fn apply(&self, id: &str, update: impl Fn(&mut serde_json::Map<String, Value>)) -> Result<ActionAck> {
        if let Some((status, message)) = self.action_failure.lock().clone() {
            return Err(AppError::Backend { status, message });
        }
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|r| r.get("_id").and_then(Value::as_str) == Some(id));
        match record {
            Some(record) => {
                update(record);
                Ok(ActionAck {
                    success: Some(true),
                    message: None,
                })
            }
            None => Err(AppError::Backend {
                status: 404,
                message: Some("Registration not found".to_string()),
            }),
        }
    }
}

#[async_trait]
impl RegistrationBackend for MockBackend {
    async fn list_registrations(&self) -> Result<Vec<RawRegistration>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(&self.list_gate).await;

        if let Some(error) = self.list_failure.lock().as_ref() {
            return Err(match error {
                AppError::Network(m) => AppError::Network(m.clone()),
                AppError::Backend { status, message } => AppError::Backend {
                    status: *status,
                    message: message.clone(),
                },
                other => AppError::Internal(other.to_string()),
            });
        }
        let body = Value::Array(self.records.lock().clone());
        Ok(RegistrationList::from_value(body)?)
    }

    async fn approve_registration(&self, id: &str) -> Result<ActionAck> {
        self.approve_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(&self.action_gate).await;
        self.apply(id, |record| {
            record.insert("isVerified".to_string(), Value::Bool(true));
            record.insert("status".to_string(), Value::String("approved".to_string()));
        })
    }

    async fn reject_registration(&self, id: &str, reason: &RejectionReason) -> Result<ActionAck> {
        self.reject_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_reason.lock() = Some(reason.as_str().to_string());
        self.pass_gate(&self.action_gate).await;
        self.apply(id, |record| {
            record.insert("isVerified".to_string(), Value::Bool(false));
            record.insert("status".to_string(), Value::String("rejected".to_string()));
        })
    }

    fn describe(&self) -> String {
        "in-memory mock backend".to_string()
    }
}
