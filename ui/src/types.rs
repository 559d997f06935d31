//! UI-side types shared between pages and components

use mentor_review_model::{Registration, ReviewAction, ReviewStatus};
use serde::{Deserialize, Serialize};

/// Placeholder every action route must contain
pub const ID_PLACEHOLDER: &str = "{id}";

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Acknowledgment of an approve/reject call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A failed API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never got a response
    Network(String),
    /// Non-2xx response or `success: false`
    Backend { status: u16, message: Option<String> },
    /// Body could not be decoded
    Decode(String),
    /// Another action for the registration is pending
    InFlight,
}

impl ApiError {
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a page-level error state
    pub fn page_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Backend { status, .. } => format!("Request failed with status {}", status),
            ApiError::Decode(e) => format!("Unexpected response from server: {}", e),
            ApiError::InFlight => "An action is already in progress".to_string(),
        }
    }
}

/// Fetch state of a page
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed(String),
}

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handed to `on_status_update` after a confirmed action and its re-fetch
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: String,
    pub registration_id: String,
    pub action: ReviewAction,
    pub status: Option<ReviewStatus>,
}

impl StatusChange {
    pub fn after_refetch(registration: &Registration, action: ReviewAction, status: Option<ReviewStatus>) -> Self {
        Self {
            id: registration.id.clone(),
            registration_id: registration.registration_id.clone(),
            action,
            status,
        }
    }
}

/// Backend location and routes, editable from the header settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub api_base: String,
    pub list_path: String,
    /// Approve route; `{id}` is replaced by the encoded internal id
    pub approve_path: String,
    pub reject_path: String,
    /// Send `{ "reason" }` with reject calls
    pub send_rejection_reason: bool,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000".to_string(),
            list_path: "/api/admin/mentor-registrations".to_string(),
            approve_path: "/api/admin/mentor-registrations/{id}/approve".to_string(),
            reject_path: "/api/admin/mentor-registrations/{id}/reject".to_string(),
            send_rejection_reason: false,
        }
    }
}

impl Connection {
    /// Trimmed copy; the base loses any trailing slash.
    pub fn normalized(&self) -> Self {
        Self {
            api_base: self.api_base.trim().trim_end_matches('/').to_string(),
            list_path: self.list_path.trim().to_string(),
            approve_path: self.approve_path.trim().to_string(),
            reject_path: self.reject_path.trim().to_string(),
            send_rejection_reason: self.send_rejection_reason,
        }
    }

    /// Check the settings before they are stored.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(format!("API base must be an http(s) URL, got '{}'", self.api_base));
        }
        if !self.list_path.starts_with('/') {
            return Err(format!("List route must start with '/', got '{}'", self.list_path));
        }
        for (name, route) in [("Approve", &self.approve_path), ("Reject", &self.reject_path)] {
            if !route.starts_with('/') || !route.contains(ID_PLACEHOLDER) {
                return Err(format!(
                    "{} route must start with '/' and contain {}, got '{}'",
                    name, ID_PLACEHOLDER, route
                ));
            }
        }
        Ok(())
    }

    /// Route template for `action`
    pub fn action_path(&self, action: ReviewAction) -> &str {
        match action {
            ReviewAction::Approve => &self.approve_path,
            ReviewAction::Reject => &self.reject_path,
        }
    }
}
