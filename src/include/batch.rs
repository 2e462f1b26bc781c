// src/include/batch.rs
// =============================================================================
// Runs every include on a page.
//
// - Scans the page once for elements with the include attribute
// - Starts all loads before waiting on any of them, so their requests are
//   in flight together
// - After every load has settled (loaded or failed), dispatches
//   AllIncludesLoaded exactly once
//
// `Includer` adds the page-lifecycle part: wait for the document to be
// ready, and never run twice.
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use super::loader::{load_into, LoadOutcome};
use super::resolve::resolve_path;
use super::source::FragmentSource;
use crate::document::{Document, ElementId, Event};

/// Attribute that marks an element as an include target.
pub const INCLUDE_ATTRIBUTE: &str = "data-include";

/// What happened to one include of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeReport {
    pub element: ElementId,
    pub declared: String,
    pub resolved: String,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

impl IncludeReport {
    pub fn is_loaded(&self) -> bool {
        self.outcome.is_loaded()
    }
}

/// Loads every include found in `document` right now.
///
/// With no include elements this does nothing at all: no fetch, no event.
pub async fn init_includes<D, S>(document: &D, source: &S, attribute: &str) -> Vec<IncludeReport>
where
    D: Document + ?Sized,
    S: FragmentSource + ?Sized,
{
    let targets = document.elements_with_attribute(attribute);
    if targets.is_empty() {
        return Vec::new();
    }

    info!(count = targets.len(), "loading includes");
    let location = document.location();

    // join_all polls every future before any completes, so all requests
    // start together; the results come back in element order
    let loads = targets.iter().map(|(element, declared)| {
        let resolved = resolve_path(declared, &location);
        async move {
            let outcome = load_into(document, source, *element, declared).await;
            IncludeReport {
                element: *element,
                declared: declared.clone(),
                resolved,
                outcome,
            }
        }
    });
    // Barrier: nothing below runs until every load has settled
    let reports = join_all(loads).await;

    let failed = reports.iter().filter(|r| !r.is_loaded()).count();
    info!(
        loaded = reports.len() - failed,
        failed, "all includes settled"
    );
    document.dispatch(Event::AllIncludesLoaded);

    reports
}

/// Include runner for one page lifetime.
pub struct Includer<S> {
    source: S,
    attribute: String,
    started: AtomicBool,
}

impl<S: FragmentSource> Includer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            attribute: INCLUDE_ATTRIBUTE.to_string(),
            started: AtomicBool::new(false),
        }
    }

    /// Uses a different marker attribute than `data-include`.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Waits for the document to be ready, then loads its includes.
    ///
    /// Returns None if this includer already ran.
    pub async fn run<D: Document + ?Sized>(&self, document: &D) -> Option<Vec<IncludeReport>> {
        // swap returns the previous value: true means a run already began
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("includes already initialised for this page");
            return None;
        }

        // Returns at once unless the page is still Loading
        document.ready().await;
        Some(init_includes(document, &self.source, &self.attribute).await)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How does join_all run the loads together?
//    - Calling an async fn only builds a future; nothing runs yet
//    - join_all polls every future once before waiting, so each load gets
//      as far as its first .await (the network request) straight away
//    - It resolves only when all of them are done, which is the barrier
//      before AllIncludesLoaded
//    - Everything stays on one task, like JavaScript's Promise.all
//
// 2. Why an AtomicBool in Includer?
//    - run() takes &self, so the "already started" flag needs interior
//      mutability
//    - swap(true) sets the flag and returns the old value in one step
//
// 3. Why `async move` inside the map closure?
//    - Each future needs its own copy of `resolved`
//    - `document` and `source` are references, so moving them just copies
//      the pointer
// -----------------------------------------------------------------------------
