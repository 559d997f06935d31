use mentor_review_model::{ModelError, ValidationError};
use serde::{Deserialize, Serialize};

// ============= Backend Wire Types =============

/// Body returned by approve/reject endpoints.
///
/// Every field is optional: some deployments answer with an empty body,
/// others with `{ "success": true, "message": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The most specific human-readable message, if any.
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Body sent with a reject call when reason transmission is enabled.
#[derive(Debug, Clone, Serialize)]
pub struct RejectRequest<'a> {
    pub reason: &'a str,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend { status: u16, message: Option<String> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An action for registration '{0}' is already in progress")]
    InFlight(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message the backend attached to a failure, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            AppError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text suitable for a page-level error state.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            AppError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Backend { status, .. } => format!("Request failed with status {}", status),
            other => other.to_string(),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(v) => AppError::Validation(v),
            other => AppError::Decode(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Backend {
                status: status.as_u16(),
                message: None,
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<crate::utils::toml_config::ConfigError> for AppError {
    fn from(err: crate::utils::toml_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "Already approved", "error": "conflict"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Already approved"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_backend_error_display() {
        let err = AppError::Backend {
            status: 409,
            message: Some("Already processed".to_string()),
        };
        assert_eq!(err.to_string(), "Backend error (409): Already processed");
        assert_eq!(err.backend_message(), Some("Already processed"));
        assert_eq!(err.user_message(), "Already processed");

        let bare = AppError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(bare.user_message(), "Request failed with status 500");
    }

    #[test]
    fn test_model_errors_convert() {
        let err: AppError = ModelError::Validation(ValidationError::EmptyRejectionReason).into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = ModelError::Malformed("bad".into()).into();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
