// src/document/mod.rs
// =============================================================================
// The document the includer and menu renderer write into.
//
// Everything that touches a page goes through the `Document` trait:
// - finding elements by attribute or by id
// - replacing an element's inner HTML
// - reading the page location
// - waiting for the page to be ready
// - dispatching notifications
//
// `HtmlPage` (html.rs) is the implementation backed by a parsed HTML file.
// Tests use it too, so the resolver and loader never need a browser.
// =============================================================================

mod html;

pub use html::HtmlPage;

use async_trait::async_trait;
use serde::Serialize;

use crate::api::Sandwich;

/// Handle to one element of a document.
///
/// Only meaningful for the document that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(pub usize);

/// Loading state of a document, same three stages a browser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Notifications raised while a page is being assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    /// One fragment was spliced into its element.
    IncludeLoaded { path: String, element: ElementId },
    /// Every include of a batch settled (loaded or failed).
    AllIncludesLoaded,
    /// The menu was rendered with these items.
    MenuLoaded { sandwiches: Vec<Sandwich> },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::IncludeLoaded { .. } => "includeLoaded",
            Event::AllIncludesLoaded => "allIncludesLoaded",
            Event::MenuLoaded { .. } => "menuLoaded",
        }
    }
}

// The page model is single-threaded (like a browser's main thread), so the
// trait does not require Send and neither do the futures it returns.
#[async_trait(?Send)]
pub trait Document {
    /// Path of the current page, e.g. `/menu/index.html`.
    fn location(&self) -> String;

    fn ready_state(&self) -> ReadyState;

    /// Resolves once the document is interactive or complete.
    async fn ready(&self);

    /// Every element carrying `attribute`, with the attribute value,
    /// in document order.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<(ElementId, String)>;

    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Replaces the entire content of `element` with `markup`.
    fn set_inner_html(&self, element: ElementId, markup: &str);

    fn dispatch(&self, event: Event);
}

/// Escapes text for use inside element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::AllIncludesLoaded.name(), "allIncludesLoaded");
        let loaded = Event::IncludeLoaded {
            path: "header.html".to_string(),
            element: ElementId(3),
        };
        assert_eq!(loaded.name(), "includeLoaded");
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = Event::IncludeLoaded {
            path: "header.html".to_string(),
            element: ElementId(3),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "includeLoaded");
        assert_eq!(json["path"], "header.html");
        assert_eq!(json["element"], 3);
    }
}
