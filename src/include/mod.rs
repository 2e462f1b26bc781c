// src/include/mod.rs
// =============================================================================
// HTML includes: elements that declare `data-include="path/to/file.html"`
// get the content of that file spliced in.
//
// Submodules:
// - resolve: relative/absolute path resolution against the page location
// - source: where fragment markup is fetched from (HTTP or a directory)
// - loader: one fragment into one element
// - batch: all includes of a page, plus the "all loaded" notification
// =============================================================================

mod batch;
mod loader;
mod resolve;
mod source;

pub use batch::{init_includes, IncludeReport, Includer, INCLUDE_ATTRIBUTE};
pub use loader::{error_markup, load_into, LoadOutcome};
pub use resolve::resolve_path;
pub use source::{DirSource, FragmentSource, HttpSource};
