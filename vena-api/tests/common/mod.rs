/// Common test utilities for API tests
///
/// Builds the router over an in-memory row store so every test gets a
/// fresh, isolated data set.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tower::Service as _;
use vena_api::app::{build_router, AppState};
use vena_api::config::Config;
use vena_shared::data::DataStore;
use vena_shared::store::{MemoryRowStore, RowMap, Table};

/// Test context containing the router and its backing stores
pub struct TestContext {
    pub store: Arc<MemoryRowStore>,
    pub data: DataStore,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context whose bulk load has already run
    pub async fn new() -> anyhow::Result<Self> {
        let ctx = Self::unloaded();
        ctx.data.load_all().await?;
        Ok(ctx)
    }

    /// Creates a context without running the bulk load
    pub fn unloaded() -> Self {
        let store = Arc::new(MemoryRowStore::new());
        let data = DataStore::new(store.clone());
        let app = build_router(AppState::new(data.clone(), Config::memory()));

        TestContext { store, data, app }
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Null` for an empty body)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<JsonValue>,
    ) -> anyhow::Result<(StatusCode, JsonValue)> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self.app.clone().call(builder.body(body)?).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: JsonValue) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: JsonValue) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> anyhow::Result<(StatusCode, JsonValue)> {
        self.send(Method::DELETE, uri, None).await
    }

    /// Seeds the single profile row with `email`
    pub async fn seed_profile(&self, email: &str) {
        self.store
            .seed(Table::Profiles, vec![profile_row(email)])
            .await;
    }
}

/// Minimal valid profile row
pub fn profile_row(email: &str) -> RowMap {
    let row = json!({
        "id": "profile-1",
        "admin_user_id": null,
        "full_name": "Vena Admin",
        "email": email,
        "phone": "0800",
        "company_name": "Vena Pictures",
        "website": "",
        "address": "Jakarta",
        "bank_account": "",
        "authorized_signer": "Vena Admin",
        "id_number": null,
        "bio": "",
        "income_categories": ["DP Proyek"],
        "expense_categories": [],
        "project_types": ["Pernikahan"],
        "event_types": [],
        "asset_categories": [],
        "sop_categories": [],
        "package_categories": [],
        "project_status_config": [],
        "notification_settings": {},
        "security_settings": {},
        "briefing_template": "",
        "terms_and_conditions": null,
        "contract_template": null,
        "logo_base64": null,
        "brand_color": "#3b82f6",
        "public_page_config": {},
        "package_share_template": null,
        "booking_form_template": null,
        "chat_templates": null
    });

    match row {
        JsonValue::Object(map) => map,
        _ => unreachable!("profile row literal is an object"),
    }
}
