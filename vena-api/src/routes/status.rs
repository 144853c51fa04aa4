/// Load status and refetch
///
/// ```text
/// GET  /v1/status    # load state, profile presence, per-collection counts
/// POST /v1/refetch   # re-run the bulk load, then answer like /v1/status
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use vena_shared::data::{DataStore, LoadState};
use vena_shared::store::Table;

/// Snapshot of what the façade holds
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub backend: String,
    pub load_state: LoadState,
    pub has_profile: bool,
    /// Records held per collection, keyed by table name
    pub counts: BTreeMap<&'static str, usize>,
}

impl StatusResponse {
    async fn collect(data: &DataStore) -> Self {
        let mut counts = BTreeMap::new();
        for table in Table::COLLECTIONS {
            counts.insert(table.name(), data.count(table).await);
        }

        StatusResponse {
            backend: data.backend().to_string(),
            load_state: data.load_state().await,
            has_profile: data.profile().await.is_some(),
            counts,
        }
    }
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::collect(&state.data).await)
}

/// Replaces every collection with a fresh bulk load
///
/// On failure the previous collections stay in place and the error is
/// returned.
pub async fn refetch(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    tracing::info!("Refetch requested");
    state.data.refetch().await?;
    Ok(Json(StatusResponse::collect(&state.data).await))
}
