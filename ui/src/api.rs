//! API client for the registration backend

use crate::state::AppState;
use crate::types::{ActionAck, ApiError, ApiErrorBody, Connection, ID_PLACEHOLDER};
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use mentor_review_model::{
    normalize_all, NormalizeOptions, Registration, RegistrationList, RejectionReason, ReviewAction,
};

/// Connection settings captured from state before an await
#[derive(Debug, Clone)]
pub struct ApiTarget {
    pub connection: Connection,
    pub token: Option<String>,
}

impl ApiTarget {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            connection: state.connection.get_untracked(),
            token: state.token.get_untracked(),
        }
    }

    fn list_url(&self) -> String {
        format!("{}{}", self.connection.api_base, self.connection.list_path)
    }

    fn action_url(&self, id: &str, action: ReviewAction) -> String {
        let id: String = js_sys::encode_uri_component(id).into();
        let path = self.connection.action_path(action).replace(ID_PLACEHOLDER, &id);
        format!("{}{}", self.connection.api_base, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => request.header("Authorization", &format!("Bearer {}", t)),
            None => request,
        }
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|m| !m.trim().is_empty());
    Err(ApiError::Backend { status, message })
}

/// Fetch and normalize every registration
pub async fn fetch_registrations(target: &ApiTarget) -> Result<Vec<Registration>, ApiError> {
    let url = target.list_url();
    let resp = target
        .authorize(Request::get(&url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let resp = check(resp).await?;

    let body = resp
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let raw = RegistrationList::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(normalize_all(raw, &NormalizeOptions::default()))
}

/// POST an approve or reject call
async fn post_action(
    target: &ApiTarget,
    id: &str,
    action: ReviewAction,
    reason: Option<&RejectionReason>,
) -> Result<ActionAck, ApiError> {
    let url = target.action_url(id, action);
    let request = target.authorize(Request::post(&url));

    let pending = match reason.filter(|_| target.connection.send_rejection_reason) {
        Some(reason) => request
            .json(&serde_json::json!({ "reason": reason.as_str() }))
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await,
        None => request.send().await,
    };
    let resp = check(pending.map_err(|e| ApiError::Network(e.to_string()))?).await?;
    let status = resp.status();

    let text = resp.text().await.unwrap_or_default();
    let ack: ActionAck = serde_json::from_str(&text).unwrap_or_default();
    if ack.success == Some(false) {
        return Err(ApiError::Backend {
            status,
            message: ack.message,
        });
    }
    Ok(ack)
}

/// Issue an action with at-most-one-in-flight per id.
///
/// The busy mirror is refreshed on both edges so rows re-render.
pub async fn run_action(
    state: &AppState,
    target: &ApiTarget,
    id: &str,
    action: ReviewAction,
    reason: Option<&RejectionReason>,
) -> Result<ActionAck, ApiError> {
    let Some(guard) = state.begin_action(id) else {
        tracing::warn!(registration_id = %id, %action, "Duplicate review action suppressed");
        return Err(ApiError::InFlight);
    };
    let result = post_action(target, guard.id(), action, reason).await;
    drop(guard);
    state.sync_busy();

    match &result {
        Ok(_) => tracing::info!(registration_id = %id, %action, "Review action confirmed"),
        Err(e) => tracing::error!(registration_id = %id, %action, error = ?e, "Review action failed"),
    }
    result
}
