// src/document/html.rs
// =============================================================================
// A `Document` backed by a parsed HTML page.
//
// We use the `scraper` crate to parse the page (html5ever underneath) and
// keep the parse tree untouched. Writes are recorded as "overrides": a map
// from element to the markup that replaces its children. `to_html()` walks
// the tree and emits the override instead of the original children, which
// is exactly what assigning innerHTML does in a browser.
//
// Rust concepts:
// - RefCell: mutation through &self (the page is single-threaded)
// - watch channel: a value plus a way to wait for it to change
// =============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{Document, ElementId, Event, ReadyState};

// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

// Elements whose text children are written out without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

pub struct HtmlPage {
    html: Html,
    location: String,
    // Every element node in document order; ElementId(i) is elements[i]
    elements: Vec<NodeId>,
    overrides: RefCell<HashMap<NodeId, String>>,
    events: RefCell<Vec<Event>>,
    ready: watch::Sender<ReadyState>,
}

impl HtmlPage {
    /// Parses a complete page. `location` is the page's path on its site.
    pub fn parse(markup: &str, location: impl Into<String>) -> Self {
        Self::with_state(markup, location.into(), ReadyState::Complete)
    }

    /// Parses a page that is still considered loading; anything awaiting
    /// `ready()` waits until `set_ready_state` moves it on.
    pub fn loading(markup: &str, location: impl Into<String>) -> Self {
        Self::with_state(markup, location.into(), ReadyState::Loading)
    }

    fn with_state(markup: &str, location: String, state: ReadyState) -> Self {
        let html = Html::parse_document(markup);
        let elements = html
            .tree
            .root()
            .descendants()
            .filter(|node| node.value().is_element())
            .map(|node| node.id())
            .collect();
        // The receiver is dropped; ready() subscribes a fresh one each call
        let (ready, _) = watch::channel(state);

        Self {
            html,
            location,
            elements,
            overrides: RefCell::new(HashMap::new()),
            events: RefCell::new(Vec::new()),
            ready,
        }
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        debug!(?state, "document ready state changed");
        // send() would fail with no receivers; send_replace always stores it
        self.ready.send_replace(state);
    }

    /// Events dispatched so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Current inner HTML of one element.
    pub fn inner_html(&self, element: ElementId) -> Option<String> {
        let node = self.node(element)?;
        let mut out = String::new();
        self.write_children(node, &mut out);
        Some(out)
    }

    /// Serialises the whole page, overrides included.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_children(self.html.tree.root(), &mut out);
        out
    }

    fn node(&self, element: ElementId) -> Option<NodeRef<'_, Node>> {
        self.elements
            .get(element.0)
            .and_then(|id| self.html.tree.get(*id))
    }

    // An element whose ancestor had its content replaced is no longer
    // part of the page.
    fn is_detached(&self, node: NodeRef<'_, Node>) -> bool {
        let overrides = self.overrides.borrow();
        node.ancestors().any(|ancestor| overrides.contains_key(&ancestor.id()))
    }

    fn attached_elements(&self) -> impl Iterator<Item = (ElementId, NodeRef<'_, Node>)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.html.tree.get(*id).map(|node| (ElementId(index), node)))
            .filter(|(_, node)| !self.is_detached(*node))
    }

    fn write_children(&self, node: NodeRef<'_, Node>, out: &mut String) {
        if let Some(markup) = self.overrides.borrow().get(&node.id()) {
            out.push_str(markup);
            return;
        }
        for child in node.children() {
            self.write_node(child, out);
        }
    }

    fn write_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Document | Node::Fragment => self.write_children(node, out),
            Node::Doctype(doctype) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype.name());
                out.push('>');
            }
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::Text(text) => {
                let raw = node
                    .parent()
                    .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
                    .map(|name| RAW_TEXT_ELEMENTS.contains(&name.as_str()))
                    .unwrap_or(false);
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.name());
                for (name, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.name()) {
                    return;
                }

                self.write_children(node, out);
                out.push_str("</");
                out.push_str(element.name());
                out.push('>');
            }
            // html5ever turns processing instructions into comments, so
            // there is nothing to write here
            Node::ProcessingInstruction(_) => {}
        }
    }
}

#[async_trait(?Send)]
impl Document for HtmlPage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn ready_state(&self) -> ReadyState {
        *self.ready.borrow()
    }

    async fn ready(&self) {
        let mut rx = self.ready.subscribe();
        // wait_for only errors once the sender is gone, and we own it
        let _ = rx.wait_for(|state| *state != ReadyState::Loading).await;
    }

    fn elements_with_attribute(&self, attribute: &str) -> Vec<(ElementId, String)> {
        self.attached_elements()
            .filter_map(|(id, node)| {
                node.value()
                    .as_element()
                    .and_then(|element| element.attr(attribute))
                    .map(|value| (id, value.to_string()))
            })
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.attached_elements()
            .find(|(_, node)| {
                node.value()
                    .as_element()
                    .and_then(|element| element.id())
                    == Some(id)
            })
            .map(|(element, _)| element)
    }

    fn set_inner_html(&self, element: ElementId, markup: &str) {
        match self.elements.get(element.0) {
            Some(node_id) => {
                self.overrides
                    .borrow_mut()
                    .insert(*node_id, markup.to_string());
            }
            None => warn!(element = element.0, "set_inner_html on unknown element"),
        }
    }

    fn dispatch(&self, event: Event) {
        debug!(event = event.name(), "dispatching event");
        self.events.borrow_mut().push(event);
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why RefCell for overrides and events?
//    - Document methods take &self (many loads hold the page at once)
//    - RefCell allows mutation through &self, checked at runtime
//    - It is not thread-safe, which is fine: the page lives on one task
//
// 2. What is the watch channel for?
//    - It holds the current ReadyState and wakes anyone waiting on it
//    - ready() subscribes and uses wait_for(), which returns at once if the
//      page is already past Loading
//    - send_replace() updates the value even when nobody is listening
//
// 3. Why keep the parse tree read-only?
//    - scraper's tree is built for querying, not editing
//    - Storing replacements separately and applying them while serialising
//      gives the same result as editing, with far less code
// -----------------------------------------------------------------------------
