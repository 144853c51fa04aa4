/// Row store boundary
///
/// The row store is the remote persistence service, treated as an opaque
/// CRUD store of flat JSON rows addressed by table and id. The data layer
/// only ever talks to it through [`RowStore`].
///
/// # Backends
///
/// - `postgres`: [`PgRowStore`], rows read and written as JSONB via sqlx
/// - `rest`: [`RestRowStore`], a PostgREST-style HTTP endpoint via reqwest
/// - `memory`: [`MemoryRowStore`], in-process rows with column defaults
///
/// # Contract
///
/// - `insert` assigns the id and column defaults and returns the stored row.
/// - `update` merges the given columns into the row with that id and
///   returns the stored row, or fails with [`StoreError::NotFound`].
/// - `delete` removes the row with that id; deleting a missing id succeeds.
/// - No call is retried by the store or by its callers.

pub mod memory;
pub mod postgres;
pub mod rest;
pub mod table;

use async_trait::async_trait;
use thiserror::Error;

pub use crate::models::RowMap;
pub use memory::MemoryRowStore;
pub use postgres::PgRowStore;
pub use rest::{RestConfig, RestRowStore};
pub use table::{ColumnDefault, Order, Table};

/// Row store errors
///
/// Failures are surfaced unmodified to the caller of the data layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with an error status
    #[error("Remote store returned {status}: {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// No row with the given id
    #[error("No row in {table} with id {id}")]
    NotFound {
        /// Table name
        table: &'static str,
        /// Requested id
        id: String,
    },

    /// A row did not match the row schema
    #[error("Malformed row in {table}: {source}")]
    Decode {
        /// Table name
        table: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// The store answered with something other than a row
    #[error("Unexpected response from {table}: {message}")]
    Malformed {
        /// Table name
        table: &'static str,
        /// What came back instead
        message: String,
    },

    /// A payload could not be encoded into row shape
    #[error("Cannot encode row: {0}")]
    Encode(String),

    /// Backend configuration error
    #[error("Row store configuration error: {0}")]
    Config(String),
}

/// Row store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque CRUD row store
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Backend name for logs and health output
    fn name(&self) -> &str;

    /// Reads every row of a table, ordered as requested
    async fn select_all(&self, table: Table, order: Option<Order>) -> StoreResult<Vec<RowMap>>;

    /// Reads the first row of a single-row table
    async fn select_single(&self, table: Table) -> StoreResult<Option<RowMap>>;

    /// Inserts a row and returns it as stored
    async fn insert(&self, table: Table, values: RowMap) -> StoreResult<RowMap>;

    /// Merges `values` into the row with `id` and returns it as stored
    async fn update(&self, table: Table, id: &str, values: RowMap) -> StoreResult<RowMap>;

    /// Deletes the row with `id`
    async fn delete(&self, table: Table, id: &str) -> StoreResult<()>;
}
