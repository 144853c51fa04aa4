//! # Vena API Server Library
//!
//! HTTP surface over the Vena data layer: one [`vena_shared::data::DataStore`]
//! per process, exposed as JSON endpoints.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
