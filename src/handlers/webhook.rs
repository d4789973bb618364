use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, RelayError};
use crate::github::DispatchRequest;
use crate::models::{DispatchEvent, PushNotification};
use crate::AppState;

/// Returned once GitHub has accepted the dispatch
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookResponse {
    /// Always `success`
    pub status: String,
    pub message: String,
    /// Image reference forwarded to GitHub
    pub image: String,
}

/// Relay a registry push notification to GitHub as a `repository_dispatch` event
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "webhook",
    request_body = PushNotification,
    responses(
        (status = 200, description = "Dispatch accepted by GitHub", body = WebhookResponse),
        (status = 400, description = "Invalid payload, or GitHub rejected the dispatch", body = ErrorResponse),
        (status = 500, description = "Missing configuration or GitHub unreachable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn receive(
    State(state): State<AppState>,
    payload: Result<Json<PushNotification>, JsonRejection>,
) -> Result<Json<WebhookResponse>, RelayError> {
    let Json(notification) = payload.map_err(|rejection| {
        warn!("Rejected webhook payload: {}", rejection.body_text());
        RelayError::InvalidPayload(rejection.body_text())
    })?;

    let image = notification.image_reference().map_err(|e| {
        warn!("Rejected webhook payload: {}", e);
        e
    })?;

    info!(
        pusher = notification.push_data.pusher.as_deref().unwrap_or("-"),
        "Docker Hub webhook received for image: {}", image
    );

    let target = state.config.github.target().map_err(|e| {
        error!("Cannot dispatch {}: {}", image, e);
        e
    })?;

    let request = DispatchRequest {
        url: target.dispatches_url(&state.config.github.api_url),
        token: target.token.clone(),
        event: DispatchEvent::image_pushed(&image),
    };

    info!(
        "Sending repository_dispatch to {} with image: {}",
        target.full_name(),
        image
    );

    let response = state.dispatcher.send(&request).await.map_err(|e| {
        error!("GitHub API request failed: {:#}", e);
        RelayError::Transport(format!("{:#}", e))
    })?;

    info!("GitHub API response: {}", response.status);

    if !response.is_accepted() {
        warn!("Error response: {}", response.body);
        return Err(RelayError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        message: format!("Triggered GitHub Action for {}", image),
        image: image.to_string(),
    }))
}
