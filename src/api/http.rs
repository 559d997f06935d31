//! HTTP implementation of [`RegistrationBackend`].

use crate::api::client::RegistrationBackend;
use crate::types::{ActionAck, ApiErrorBody, AppError, RejectRequest, Result};
use crate::utils::toml_config::{BackendConfig, ID_PLACEHOLDER};
use async_trait::async_trait;
use mentor_review_model::review::validate_id;
use mentor_review_model::{RawRegistration, RegistrationList, RejectionReason};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};

/// Talks to the registration backend over JSON/HTTP.
#[derive(Clone)]
pub struct HttpRegistrationBackend {
    client: Client,
    config: BackendConfig,
    token: Option<String>,
}

impl HttpRegistrationBackend {
    /// Build a backend from configuration and an optional bearer token.
    pub fn new(config: BackendConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("mentor-review/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Build a backend resolving the token from the configured env var.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let token = config.token();
        if token.is_none() {
            warn!(
                token_env = %config.token_env,
                "No admin token in environment, requests will be unauthenticated"
            );
        }
        Self::new(config.clone(), token)
    }

    /// The active configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn action_url(&self, template: &str, id: &str) -> String {
        self.url(&template.replace(ID_PLACEHOLDER, &urlencoding::encode(id)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post_action(&self, url: String, body: Option<RejectRequest<'_>>) -> Result<ActionAck> {
        debug!(%url, with_body = body.is_some(), "POST review action");

        let request = self.authorize(self.client.post(&url));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = check_status(request.send().await?).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ActionAck::default());
        }

        let ack: ActionAck = match serde_json::from_slice(&bytes) {
            Ok(ack) => ack,
            Err(e) => {
                // success status with a non-JSON body still counts as success
                debug!(error = %e, "Ignoring non-JSON action response body");
                return Ok(ActionAck::default());
            }
        };

        if ack.success == Some(false) {
            return Err(AppError::Backend {
                status,
                message: ack.message,
            });
        }
        Ok(ack)
    }
}

#[async_trait]
impl RegistrationBackend for HttpRegistrationBackend {
    async fn list_registrations(&self) -> Result<Vec<RawRegistration>> {
        let url = self.url(&self.config.list_path);
        debug!(%url, "GET registrations");

        let response = check_status(self.authorize(self.client.get(&url)).send().await?).await?;
        let bytes = response.bytes().await?;
        let records = RegistrationList::from_slice(&bytes)?;

        debug!(count = records.len(), "Fetched registrations");
        Ok(records)
    }

    async fn approve_registration(&self, id: &str) -> Result<ActionAck> {
        let id = validate_id(id)?;
        let url = self.action_url(&self.config.approve_path, id);
        self.post_action(url, None).await
    }

    async fn reject_registration(&self, id: &str, reason: &RejectionReason) -> Result<ActionAck> {
        let id = validate_id(id)?;
        let url = self.action_url(&self.config.reject_path, id);
        let body = self.config.send_rejection_reason.then(|| RejectRequest {
            reason: reason.as_str(),
        });
        if body.is_none() {
            debug!(registration_id = %id, "Rejection reason not transmitted (send_rejection_reason = false)");
        }
        self.post_action(url, body).await
    }

    fn describe(&self) -> String {
        format!("HTTP backend at {}", self.config.base_url)
    }
}

/// Turn non-2xx responses into [`AppError::Backend`] carrying the backend's message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(ApiErrorBody::into_message);

    warn!(status = status.as_u16(), message = ?message, "Backend request failed");
    Err(AppError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpRegistrationBackend {
        let config = BackendConfig {
            base_url: "https://api.example.com/".to_string(),
            ..BackendConfig::default()
        };
        HttpRegistrationBackend::new(config, None).unwrap()
    }

    #[test]
    fn test_action_url() {
        let backend = backend();
        assert_eq!(
            backend.action_url("/api/admin/mentor-registrations/{id}/approve", "65f1c0"),
            "https://api.example.com/api/admin/mentor-registrations/65f1c0/approve"
        );
    }

    #[test]
    fn test_ids_are_path_encoded() {
        let backend = backend();
        assert_eq!(
            backend.action_url("/r/{id}/approve", "MR/2024 01"),
            "https://api.example.com/r/MR%2F2024%2001/approve"
        );
        assert_eq!(
            backend.action_url("/r/{id}/approve", "abc-DEF_1.2~"),
            "https://api.example.com/r/abc-DEF_1.2~/approve"
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(backend().describe(), "HTTP backend at https://api.example.com/");
    }
}
