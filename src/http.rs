//! HTTP surface — inbound email events and pull-request webhooks.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::github::GithubClient;
use crate::pipeline::processor::EmailProcessor;
use crate::pipeline::types::EmailEvent;
use crate::webhooks::{self, PullRequestEvent, WebhookResponse};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<EmailProcessor>,
    pub github: Arc<GithubClient>,
    /// Commit-status context prefix.
    pub namespace: String,
}

/// Build the Axum router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/email", post(inbound_email))
        .route("/webhooks/extension", post(extension_webhook))
        .route("/webhooks/weblate", post(weblate_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mailgate"
    }))
}

async fn inbound_email(
    State(state): State<AppState>,
    Json(event): Json<EmailEvent>,
) -> impl IntoResponse {
    let response = state.processor.process(&event).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, response.body)
}

async fn extension_webhook(
    State(state): State<AppState>,
    Json(event): Json<PullRequestEvent>,
) -> impl IntoResponse {
    to_http(webhooks::extension::handle(&event, &state.github, &state.namespace).await)
}

async fn weblate_webhook(
    State(state): State<AppState>,
    Json(event): Json<PullRequestEvent>,
) -> impl IntoResponse {
    to_http(webhooks::weblate::handle(&event, &state.github).await)
}

fn to_http(response: WebhookResponse) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // 204 responses must not carry a body on the wire.
    if status == StatusCode::NO_CONTENT {
        return (status, String::new());
    }
    (status, response.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_drops_body() {
        let (status, body) = to_http(WebhookResponse::no_action("Process finished"));
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[test]
    fn error_keeps_body() {
        let (status, body) = to_http(WebhookResponse::error("boom"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "boom");
    }
}
