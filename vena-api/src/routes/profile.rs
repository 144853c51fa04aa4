/// Vendor profile
///
/// ```text
/// GET   /v1/profile
/// PATCH /v1/profile   # partial update, camelCase body
/// ```
///
/// Both answer 404 when no profile row was loaded.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use vena_shared::models::profile::ProfilePatch;
use vena_shared::models::Profile;

pub async fn get_profile(State(state): State<AppState>) -> ApiResult<Json<Profile>> {
    state
        .data
        .profile()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No vendor profile is loaded".to_string()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<Profile>> {
    let profile = state.data.update_profile(patch).await?;
    tracing::info!(id = %profile.id, "Profile updated");
    Ok(Json(profile))
}
