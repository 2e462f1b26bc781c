// src/api/mod.rs
// =============================================================================
// Access to the sandwich shop REST API.
//
// Submodules:
// - client: the HTTP helpers (orders, reviews, sandwiches)
// - models: the menu item record
// =============================================================================

mod client;
mod models;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use models::Sandwich;
