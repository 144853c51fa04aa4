/// PostgreSQL row store
///
/// Rows cross the boundary as JSONB: reads use `to_jsonb(row)`, writes feed
/// the payload through `jsonb_populate_record` so Postgres does the type
/// coercion and column defaults apply to every column the payload omits.
/// Column names come from payload keys and are checked and quoted before
/// they reach SQL; values are always bound.
///
/// # Example
///
/// ```no_run
/// use vena_shared::db::pool::{create_pool, DatabaseConfig};
/// use vena_shared::store::{PgRowStore, RowStore, Table};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgRowStore::new(pool);
/// let rows = store.select_all(Table::Clients, Table::Clients.order()).await?;
/// println!("{} clients", rows.len());
/// # Ok(())
/// # }
/// ```

use super::{RowMap, RowStore, StoreError, StoreResult};
use crate::store::table::{Order, Table};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    pub fn new(pool: PgPool) -> Self {
        PgRowStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Quotes a column name, rejecting anything but `[a-z0-9_]`
fn quote_ident(name: &str) -> StoreResult<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(format!("\"{}\"", name))
    } else {
        Err(StoreError::Encode(format!("invalid column name: {:?}", name)))
    }
}

fn quoted_columns(values: &RowMap) -> StoreResult<Vec<String>> {
    values.keys().map(|column| quote_ident(column)).collect()
}

fn select_all_sql(table: Table, order: Option<Order>) -> StoreResult<String> {
    let mut sql = format!("SELECT to_jsonb(t) FROM \"{}\" t", table.name());
    if let Some(order) = order {
        sql.push_str(&format!(
            " ORDER BY t.{} {}",
            quote_ident(order.column)?,
            if order.ascending { "ASC" } else { "DESC" }
        ));
    }
    Ok(sql)
}

fn select_single_sql(table: Table) -> String {
    format!("SELECT to_jsonb(t) FROM \"{}\" t LIMIT 1", table.name())
}

fn select_by_id_sql(table: Table) -> String {
    format!(
        "SELECT to_jsonb(t) FROM \"{}\" t WHERE t.id::text = $1",
        table.name()
    )
}

fn insert_sql(table: Table, columns: &[String]) -> String {
    let name = table.name();
    if columns.is_empty() {
        return format!(
            "INSERT INTO \"{name}\" DEFAULT VALUES RETURNING to_jsonb(\"{name}\".*)"
        );
    }

    let list = columns.join(", ");
    format!(
        "INSERT INTO \"{name}\" ({list}) \
         SELECT {list} FROM jsonb_populate_record(NULL::\"{name}\", $1) \
         RETURNING to_jsonb(\"{name}\".*)"
    )
}

fn update_sql(table: Table, columns: &[String]) -> String {
    let name = table.name();
    let assignments = columns
        .iter()
        .map(|column| format!("{column} = r.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE \"{name}\" SET {assignments} \
         FROM jsonb_populate_record(NULL::\"{name}\", $1) r \
         WHERE \"{name}\".id::text = $2 \
         RETURNING to_jsonb(\"{name}\".*)"
    )
}

fn delete_sql(table: Table) -> String {
    format!("DELETE FROM \"{}\" WHERE id::text = $1", table.name())
}

fn into_row(table: Table, value: JsonValue) -> StoreResult<RowMap> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(StoreError::Malformed {
            table: table.name(),
            message: format!("non-object row {}", other),
        }),
    }
}

#[async_trait]
impl RowStore for PgRowStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn select_all(&self, table: Table, order: Option<Order>) -> StoreResult<Vec<RowMap>> {
        let sql = select_all_sql(table, order)?;
        let rows: Vec<JsonValue> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;

        tracing::debug!(%table, count = rows.len(), "Selected rows");
        rows.into_iter().map(|row| into_row(table, row)).collect()
    }

    async fn select_single(&self, table: Table) -> StoreResult<Option<RowMap>> {
        let row: Option<JsonValue> = sqlx::query_scalar(&select_single_sql(table))
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| into_row(table, row)).transpose()
    }

    async fn insert(&self, table: Table, values: RowMap) -> StoreResult<RowMap> {
        let columns = quoted_columns(&values)?;
        let sql = insert_sql(table, &columns);

        let row: JsonValue = sqlx::query_scalar(&sql)
            .bind(JsonValue::Object(values))
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(%table, "Inserted row");
        into_row(table, row)
    }

    async fn update(&self, table: Table, id: &str, values: RowMap) -> StoreResult<RowMap> {
        let not_found = || StoreError::NotFound {
            table: table.name(),
            id: id.to_string(),
        };

        let mut values = values;
        values.remove("id");

        let row: Option<JsonValue> = if values.is_empty() {
            sqlx::query_scalar(&select_by_id_sql(table))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        } else {
            let columns = quoted_columns(&values)?;
            sqlx::query_scalar(&update_sql(table, &columns))
                .bind(JsonValue::Object(values))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        };

        let row = row.ok_or_else(not_found)?;
        tracing::debug!(%table, id, "Updated row");
        into_row(table, row)
    }

    async fn delete(&self, table: Table, id: &str) -> StoreResult<()> {
        let result = sqlx::query(&delete_sql(table))
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(%table, id, deleted = result.rows_affected(), "Deleted row");
        Ok(())
    }
}
