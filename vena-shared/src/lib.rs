//! # Vena Shared Library
//!
//! Data layer of the Vena vendor workspace: entity models and their row
//! transformers, the row store boundary and its backends, the data access
//! façade, persisted local state and view dispatch.
//!
//! ## Module Organization
//!
//! - `models`: entity models, row shapes and payloads
//! - `store`: row store trait, table catalogue, Postgres/REST/memory backends
//! - `data`: `DataStore` façade owning every collection
//! - `persist`: `PersistentState` and key-value backends
//! - `local`: local-first workspace built on `persist`
//! - `navigation`: hash-route dispatch and permission gate
//! - `notify`: notification fan-out
//! - `db`: Postgres pool and migrations

#![recursion_limit = "256"]

pub mod data;
pub mod db;
pub mod local;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod persist;
pub mod store;

/// Current version of the Vena shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
