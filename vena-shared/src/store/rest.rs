/// PostgREST-style HTTP row store
///
/// Talks to a hosted row service over its REST surface:
///
/// | Operation     | Request                                              |
/// |---------------|------------------------------------------------------|
/// | select_all    | `GET /rest/v1/{table}?select=*&order={col}.{dir}`    |
/// | select_single | `GET /rest/v1/{table}?select=*&limit=1`              |
/// | insert        | `POST /rest/v1/{table}`                              |
/// | update        | `PATCH /rest/v1/{table}?id=eq.{id}`                  |
/// | delete        | `DELETE /rest/v1/{table}?id=eq.{id}`                 |
///
/// Every request carries the `apikey` header and the same key as a bearer
/// token. Writes ask for `Prefer: return=representation` so the stored row
/// comes back in the response.

use super::{RowMap, RowStore, StoreError, StoreResult};
use crate::store::table::{Order, Table};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value as JsonValue;
use std::env;
use std::fmt;
use std::time::Duration;

/// REST endpoint configuration
///
/// `Debug` output redacts the key.
#[derive(Clone)]
pub struct RestConfig {
    /// Service base URL, without the `/rest/v1` suffix
    pub url: String,

    /// Anonymous or service key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        RestConfig {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("RestConfig")
            .field("url", &self.url)
            .field("api_key", &api_key)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RestConfig {
    /// Loads `VENA_REST_URL` (required), `VENA_REST_KEY` (required) and
    /// `VENA_REST_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();

        let url = env::var("VENA_REST_URL")
            .map_err(|_| StoreError::Config("VENA_REST_URL is required".to_string()))?;
        let api_key = env::var("VENA_REST_KEY")
            .map_err(|_| StoreError::Config("VENA_REST_KEY is required".to_string()))?;
        let timeout_secs = env::var("VENA_REST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(RestConfig {
            url,
            api_key,
            timeout_secs,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RestRowStore {
    client: Client,
    config: RestConfig,
}

impl RestRowStore {
    pub fn new(config: RestConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(RestRowStore { client, config })
    }

    fn table_url(&self, table: Table) -> String {
        table_url(&self.config.url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}

fn table_url(base: &str, table: Table) -> String {
    format!("{}/rest/v1/{}", base.trim_end_matches('/'), table.name())
}

fn order_param(order: Order) -> String {
    format!(
        "{}.{}",
        order.column,
        if order.ascending { "asc" } else { "desc" }
    )
}

fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

/// Fails on a non-success status, keeping the response body as the message
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => status.canonical_reason().unwrap_or("unknown").to_string(),
    };
    Err(StoreError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn into_rows(table: Table, body: JsonValue) -> StoreResult<Vec<RowMap>> {
    match body {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::Object(map) => Ok(map),
                other => Err(StoreError::Malformed {
                    table: table.name(),
                    message: format!("non-object row {}", other),
                }),
            })
            .collect(),
        JsonValue::Object(map) => Ok(vec![map]),
        other => Err(StoreError::Malformed {
            table: table.name(),
            message: format!("unexpected body {}", other),
        }),
    }
}

#[async_trait]
impl RowStore for RestRowStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn select_all(&self, table: Table, order: Option<Order>) -> StoreResult<Vec<RowMap>> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(order) = order {
            query.push(("order", order_param(order)));
        }

        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&query)
            .send()
            .await?;
        let body: JsonValue = check(response).await?.json().await?;

        let rows = into_rows(table, body)?;
        tracing::debug!(%table, count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    async fn select_single(&self, table: Table) -> StoreResult<Option<RowMap>> {
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&[("select", "*"), ("limit", "1")])
            .send()
            .await?;
        let body: JsonValue = check(response).await?.json().await?;
        Ok(into_rows(table, body)?.into_iter().next())
    }

    async fn insert(&self, table: Table, values: RowMap) -> StoreResult<RowMap> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&values)
            .send()
            .await?;
        let body: JsonValue = check(response).await?.json().await?;

        into_rows(table, body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Malformed {
                table: table.name(),
                message: "insert returned no row".to_string(),
            })
    }

    async fn update(&self, table: Table, id: &str, values: RowMap) -> StoreResult<RowMap> {
        let response = self
            .authorized(self.client.patch(self.table_url(table)))
            .query(&[("id", id_filter(id))])
            .header("Prefer", "return=representation")
            .json(&values)
            .send()
            .await?;
        let body: JsonValue = check(response).await?.json().await?;

        into_rows(table, body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                table: table.name(),
                id: id.to_string(),
            })
    }

    async fn delete(&self, table: Table, id: &str) -> StoreResult<()> {
        let response = self
            .authorized(self.client.delete(self.table_url(table)))
            .query(&[("id", id_filter(id))])
            .send()
            .await?;
        check(response).await?;

        tracing::debug!(%table, id, "Deleted row");
        Ok(())
    }
}
