// src/include/loader.rs
// =============================================================================
// Loads one fragment into one element.
//
// Steps:
// 1. Resolve the declared path against the page location
// 2. Fetch it from the fragment source
// 3. On success: the markup becomes the element's content, and an
//    IncludeLoaded event goes out
// 4. On failure: the element shows an inline error, the error is logged
//
// Either way the caller gets a LoadOutcome back; nothing is propagated.
// =============================================================================

use serde::Serialize;
use tracing::{debug, error};

use super::resolve::resolve_path;
use super::source::FragmentSource;
use crate::document::{escape_html, Document, ElementId, Event};

/// How a single load ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The element now holds this markup.
    Loaded { markup: String },
    /// The element now shows an inline error.
    Failed { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Markup shown in place of a fragment that could not be loaded.
pub fn error_markup(declared: &str) -> String {
    format!(
        r#"<p style="color: red;">Error loading {}</p>"#,
        escape_html(declared)
    )
}

/// Loads the fragment declared as `declared` into `element`.
pub async fn load_into<D, S>(
    document: &D,
    source: &S,
    element: ElementId,
    declared: &str,
) -> LoadOutcome
where
    D: Document + ?Sized,
    S: FragmentSource + ?Sized,
{
    let resolved = resolve_path(declared, &document.location());
    debug!(declared, %resolved, "loading include");

    match source.fetch(&resolved).await {
        Ok(markup) => {
            document.set_inner_html(element, &markup);
            document.dispatch(Event::IncludeLoaded {
                path: declared.to_string(),
                element,
            });
            LoadOutcome::Loaded { markup }
        }
        Err(e) => {
            let reason = format!("Failed to load {}: {}", declared, e);
            error!(path = declared, %resolved, error = %e, "error loading include");
            document.set_inner_html(element, &error_markup(declared));
            LoadOutcome::Failed { reason }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why generic over D and S with `?Sized`?
//    - `D: Document + ?Sized` accepts both a concrete HtmlPage and a
//      `&dyn Document`
//    - Without `?Sized`, trait objects could not be passed in
//
// 2. Why return LoadOutcome instead of Result?
//    - A failed include is an expected outcome, not an error for the caller
//    - The page already shows the inline message; the caller only needs to
//      know what happened (the CLI uses it for its exit code)
//
// 3. What does `error = %e` mean in the tracing macro?
//    - `%` records the field with its Display impl ("404 Not Found")
//    - `?` would use Debug instead
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlPage;
    use crate::error::{ClientError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Serves fixed markup per path, 404 for anything else, and records
    // which paths were asked for
    struct MapSource {
        files: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MapSource {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FragmentSource for MapSource {
        async fn fetch(&self, resolved_path: &str) -> Result<String> {
            self.requested.lock().unwrap().push(resolved_path.to_string());
            self.files
                .get(resolved_path)
                .cloned()
                .ok_or(ClientError::Status {
                    status: 404,
                    reason: "Not Found".to_string(),
                })
        }
    }

    fn page() -> HtmlPage {
        HtmlPage::parse(
            r#"<div data-include="../parts/header.html">placeholder</div>"#,
            "/shop/menu/index.html",
        )
    }

    #[tokio::test]
    async fn test_load_success_sets_content_and_dispatches() {
        let page = page();
        let source = MapSource::new(&[("/shop/parts/header.html", "<nav>Shop</nav>")]);
        let (element, declared) = page.elements_with_attribute("data-include")[0].clone();

        let outcome = load_into(&page, &source, element, &declared).await;

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                markup: "<nav>Shop</nav>".to_string()
            }
        );
        assert_eq!(page.inner_html(element).unwrap(), "<nav>Shop</nav>");
        assert_eq!(
            page.events(),
            vec![Event::IncludeLoaded {
                path: "../parts/header.html".to_string(),
                element,
            }]
        );
        assert_eq!(
            *source.requested.lock().unwrap(),
            vec!["/shop/parts/header.html".to_string()]
        );
    }

    #[tokio::test]
    async fn test_load_failure_shows_inline_error() {
        let page = page();
        let source = MapSource::new(&[]);
        let (element, declared) = page.elements_with_attribute("data-include")[0].clone();

        let outcome = load_into(&page, &source, element, &declared).await;

        match outcome {
            LoadOutcome::Failed { reason } => {
                assert_eq!(reason, "Failed to load ../parts/header.html: 404 Not Found")
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(
            page.inner_html(element).unwrap(),
            r#"<p style="color: red;">Error loading ../parts/header.html</p>"#
        );
        assert!(page.events().is_empty());
    }

    #[test]
    fn test_error_markup_escapes_path() {
        assert_eq!(
            error_markup("<x>.html"),
            r#"<p style="color: red;">Error loading &lt;x&gt;.html</p>"#
        );
    }
}
