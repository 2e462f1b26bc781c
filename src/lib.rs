// src/lib.rs
// =============================================================================
// sandwich-client: the client side of the sandwich shop site.
//
// Modules:
// - include: splices `data-include` fragments into a page (the core)
// - document: the page abstraction everything writes into
// - menu: renders the sandwich menu from the API
// - api: read-only helpers for the REST API
// - error: the shared error type
// - logging: tracing setup for the CLI
// =============================================================================

pub mod api;
pub mod document;
pub mod error;
pub mod include;
pub mod logging;
pub mod menu;

pub use document::{Document, ElementId, Event, HtmlPage, ReadyState};
pub use error::{ClientError, Result};
pub use include::{init_includes, resolve_path, Includer, IncludeReport, LoadOutcome};
