/// In-process row store
///
/// Keeps rows per table in insertion order and applies the same column
/// defaults the database schema declares. Backs tests and the API when no
/// database is configured.

use super::{RowMap, RowStore, StoreError, StoreResult};
use crate::store::table::{Order, Table};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryRowStore {
    tables: RwLock<HashMap<Table, Vec<RowMap>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `rows` as-is, replacing whatever `table` held
    pub async fn seed(&self, table: Table, rows: Vec<RowMap>) {
        self.tables.write().await.insert(table, rows);
    }

    /// Number of rows held for `table`
    pub async fn count(&self, table: Table) -> usize {
        self.tables
            .read()
            .await
            .get(&table)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn row_id(row: &RowMap) -> Option<&str> {
    row.get("id").and_then(JsonValue::as_str)
}

/// Orders two column values; nulls sort last ascending, like Postgres
fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn sort_rows(rows: &mut [RowMap], order: Order) {
    rows.sort_by(|a, b| {
        let ord = compare_values(a.get(order.column), b.get(order.column));
        if order.ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

#[async_trait]
impl RowStore for MemoryRowStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn select_all(&self, table: Table, order: Option<Order>) -> StoreResult<Vec<RowMap>> {
        let mut rows = self
            .tables
            .read()
            .await
            .get(&table)
            .cloned()
            .unwrap_or_default();

        if let Some(order) = order {
            sort_rows(&mut rows, order);
        }
        Ok(rows)
    }

    async fn select_single(&self, table: Table) -> StoreResult<Option<RowMap>> {
        Ok(self
            .tables
            .read()
            .await
            .get(&table)
            .and_then(|rows| rows.first().cloned()))
    }

    async fn insert(&self, table: Table, mut values: RowMap) -> StoreResult<RowMap> {
        table.apply_defaults(&mut values);
        self.tables
            .write()
            .await
            .entry(table)
            .or_default()
            .push(values.clone());

        tracing::trace!(%table, id = ?row_id(&values), "Inserted row");
        Ok(values)
    }

    async fn update(&self, table: Table, id: &str, values: RowMap) -> StoreResult<RowMap> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row_id(row) == Some(id)))
            .ok_or_else(|| StoreError::NotFound {
                table: table.name(),
                id: id.to_string(),
            })?;

        for (column, value) in values {
            if column != "id" {
                row.insert(column, value);
            }
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: Table, id: &str) -> StoreResult<()> {
        if let Some(rows) = self.tables.write().await.get_mut(&table) {
            rows.retain(|row| row_id(row) != Some(id));
        }
        Ok(())
    }
}
