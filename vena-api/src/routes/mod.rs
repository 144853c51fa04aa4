/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `status`: Load state, per-collection counts and refetch
/// - `profile`: Vendor profile singleton
/// - `collections`: Generic CRUD over every entity collection
/// - `inbox`: Notification publishing and read receipts

pub mod collections;
pub mod health;
pub mod inbox;
pub mod profile;
pub mod status;
