/// Generic collection endpoints
///
/// Every entity collection is addressed by its table name:
///
/// ```text
/// GET    /v1/:collection        # all records, in held order
/// POST   /v1/:collection        # create, body is the creation payload
/// GET    /v1/:collection/:id
/// PATCH  /v1/:collection/:id    # partial update, `null` clears a field
/// DELETE /v1/:collection/:id
/// ```
///
/// Bodies are model-shape (camelCase) JSON. Creation payloads are validated
/// before they reach the data layer. An unknown collection name answers 404.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;
use validator::Validate;
use vena_shared::data::DataStore;
use vena_shared::models::{
    AddOn, Asset, Card, Client, ClientFeedback, Contract, Entity, FinancialPocket, Lead,
    Notification, Package, Project, PromoCode, RewardLedgerEntry, SocialMediaPost, Sop,
    TeamMember, TeamPaymentRecord, TeamProjectPayment, Transaction,
};
use vena_shared::store::Table;

/// Runs `$op::<Entity>(args..)` for the entity stored in `$name`
macro_rules! dispatch {
    ($name:expr, $op:ident($($arg:expr),*)) => {{
        let name: &str = $name;
        match Table::parse(name) {
            Some(Table::Clients) => $op::<Client>($($arg),*).await,
            Some(Table::Projects) => $op::<Project>($($arg),*).await,
            Some(Table::TeamMembers) => $op::<TeamMember>($($arg),*).await,
            Some(Table::Transactions) => $op::<Transaction>($($arg),*).await,
            Some(Table::Cards) => $op::<Card>($($arg),*).await,
            Some(Table::FinancialPockets) => $op::<FinancialPocket>($($arg),*).await,
            Some(Table::Leads) => $op::<Lead>($($arg),*).await,
            Some(Table::Packages) => $op::<Package>($($arg),*).await,
            Some(Table::AddOns) => $op::<AddOn>($($arg),*).await,
            Some(Table::Assets) => $op::<Asset>($($arg),*).await,
            Some(Table::Contracts) => $op::<Contract>($($arg),*).await,
            Some(Table::ClientFeedback) => $op::<ClientFeedback>($($arg),*).await,
            Some(Table::Notifications) => $op::<Notification>($($arg),*).await,
            Some(Table::SocialMediaPosts) => $op::<SocialMediaPost>($($arg),*).await,
            Some(Table::PromoCodes) => $op::<PromoCode>($($arg),*).await,
            Some(Table::Sops) => $op::<Sop>($($arg),*).await,
            Some(Table::TeamProjectPayments) => $op::<TeamProjectPayment>($($arg),*).await,
            Some(Table::TeamPaymentRecords) => $op::<TeamPaymentRecord>($($arg),*).await,
            Some(Table::RewardLedgerEntries) => $op::<RewardLedgerEntry>($($arg),*).await,
            // The profile is a singleton with its own route
            Some(Table::Profiles) | None => Err(ApiError::unknown_collection(name)),
        }
    }};
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    dispatch!(&collection, list_as(&state.data)).map(Json)
}

pub async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<JsonValue>> {
    dispatch!(&collection, get_as(&state.data, &id)).map(Json)
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<JsonValue>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let created = dispatch!(&collection, create_as(&state.data, body))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<JsonValue>,
) -> ApiResult<Json<JsonValue>> {
    dispatch!(&collection, update_as(&state.data, &id, body)).map(Json)
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    dispatch!(&collection, delete_as(&state.data, &id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_as<E: Entity>(data: &DataStore) -> ApiResult<JsonValue> {
    Ok(serde_json::to_value(data.list::<E>().await)?)
}

async fn get_as<E: Entity>(data: &DataStore, id: &str) -> ApiResult<JsonValue> {
    let record = data
        .get::<E>(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No record in {} with id {}", E::TABLE, id)))?;
    Ok(serde_json::to_value(record)?)
}

async fn create_as<E: Entity>(data: &DataStore, body: JsonValue) -> ApiResult<JsonValue> {
    let new: E::New = serde_json::from_value(body).map_err(ApiError::invalid_body)?;
    new.validate()?;

    let created = data.create::<E>(new).await?;
    tracing::info!(table = %E::TABLE, id = created.id(), "Record created");
    Ok(serde_json::to_value(created)?)
}

async fn update_as<E: Entity>(data: &DataStore, id: &str, body: JsonValue) -> ApiResult<JsonValue> {
    let patch: E::Patch = serde_json::from_value(body).map_err(ApiError::invalid_body)?;

    let updated = data.update::<E>(id, patch).await?;
    tracing::info!(table = %E::TABLE, id, "Record updated");
    Ok(serde_json::to_value(updated)?)
}

async fn delete_as<E: Entity>(data: &DataStore, id: &str) -> ApiResult<()> {
    data.delete::<E>(id).await?;
    tracing::info!(table = %E::TABLE, id, "Record deleted");
    Ok(())
}
