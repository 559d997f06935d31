//! Shared fixtures for integration tests.
#![allow(dead_code)]

pub mod mocks;

use mentor_review::{DisplayConfig, ReviewCoordinator};
use mocks::MockBackend;
use serde_json::{json, Value};
use std::sync::Arc;

/// A pending record in the backend's camelCase shape.
pub fn pending_record(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "registrationId": format!("MR-{}", id),
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "qualifications": ["M.Sc. Physics"],
        "experience": 6,
        "isVerified": false,
        "appliedAt": "2024-03-12T09:30:00Z"
    })
}

pub fn approved_record(id: &str, name: &str) -> Value {
    let mut record = pending_record(id, name);
    record["isVerified"] = Value::Bool(true);
    record
}

pub fn rejected_record(id: &str, name: &str) -> Value {
    let mut record = pending_record(id, name);
    record["status"] = Value::String("rejected".to_string());
    record
}

/// Backend plus a coordinator wired to it.
pub fn setup(records: Vec<Value>) -> (Arc<MockBackend>, ReviewCoordinator) {
    setup_with(MockBackend::new(records))
}

pub fn setup_with(backend: MockBackend) -> (Arc<MockBackend>, ReviewCoordinator) {
    let backend = Arc::new(backend);
    let coordinator = ReviewCoordinator::new(backend.clone());
    (backend, coordinator)
}

pub fn display() -> DisplayConfig {
    DisplayConfig::default()
}
