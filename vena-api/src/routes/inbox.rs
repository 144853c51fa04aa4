/// Notification inbox
///
/// ```text
/// POST /v1/inbox                # publish a notification draft
/// POST /v1/inbox/read-all       # mark every unread notification read
/// POST /v1/inbox/:id/read       # mark one notification read
/// ```
///
/// Publishing stores the notification and mails it to the profile's email
/// address when one is set. Notifications are listed through the generic
/// `/v1/notifications` collection.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use validator::Validate;
use vena_shared::models::Notification;
use vena_shared::notify::NotificationDraft;

#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    /// Notifications that changed from unread to read
    pub updated: usize,
}

pub async fn publish(
    State(state): State<AppState>,
    Json(draft): Json<NotificationDraft>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    draft.validate()?;
    let notification = state.notifier.publish(&state.data, draft).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Notification>> {
    Ok(Json(state.notifier.mark_read(&state.data, &id).await?))
}

pub async fn mark_all_read(State(state): State<AppState>) -> ApiResult<Json<ReadAllResponse>> {
    let updated = state.notifier.mark_all_read(&state.data).await?;
    tracing::info!(updated, "Marked notifications read");
    Ok(Json(ReadAllResponse { updated }))
}
