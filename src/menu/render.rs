// src/menu/render.rs
// =============================================================================
// Fetches the sandwich list and renders it into #menu-container.
//
// The container goes through these states:
//   loading message -> cards          (items returned)
//                   -> empty message  (empty list, no MenuLoaded event)
//                   -> error message  (anything failed)
// A page without the container is left alone.
// =============================================================================

use tracing::{error, info};

use super::price::format_price;
use crate::api::{ApiClient, Sandwich};
use crate::document::{escape_html, Document, Event};
use crate::error::{ClientError, Result};

pub const MENU_CONTAINER_ID: &str = "menu-container";

const LOADING_MARKUP: &str = r#"<p class="loading-message">Loading menu...</p>"#;
const EMPTY_MARKUP: &str = r#"<p class="empty-message">No menu items available.</p>"#;

#[derive(Debug, Clone, PartialEq)]
pub enum MenuOutcome {
    /// The page has no menu container; nothing was touched.
    MissingContainer,
    /// The API returned no items.
    Empty,
    /// One card per item was rendered.
    Loaded(Vec<Sandwich>),
    /// The container shows this error message.
    Failed(String),
}

/// Loads the menu into the page's menu container.
pub async fn load_menu<D: Document + ?Sized>(document: &D, api: &ApiClient) -> MenuOutcome {
    let Some(container) = document.element_by_id(MENU_CONTAINER_ID) else {
        error!(id = MENU_CONTAINER_ID, "menu container not found");
        return MenuOutcome::MissingContainer;
    };

    document.set_inner_html(container, LOADING_MARKUP);

    match fetch_menu(api).await {
        Ok(sandwiches) if sandwiches.is_empty() => {
            document.set_inner_html(container, EMPTY_MARKUP);
            MenuOutcome::Empty
        }
        Ok(sandwiches) => {
            let cards: String = sandwiches.iter().map(card_markup).collect();
            document.set_inner_html(container, &cards);
            info!(items = sandwiches.len(), "menu loaded");
            document.dispatch(Event::MenuLoaded {
                sandwiches: sandwiches.clone(),
            });
            MenuOutcome::Loaded(sandwiches)
        }
        Err(e) => {
            let message = match &e {
                ClientError::Status { .. } => format!("Failed to load menu: {}", e),
                other => other.to_string(),
            };
            error!(error = %message, "error loading menu");
            document.set_inner_html(container, &error_markup(&message));
            MenuOutcome::Failed(message)
        }
    }
}

async fn fetch_menu(api: &ApiClient) -> Result<Vec<Sandwich>> {
    let body = api.fetch_sandwiches().await?;
    if !body.is_array() {
        return Err(ClientError::InvalidFormat {
            message: "Invalid response format from API".to_string(),
        });
    }
    Ok(serde_json::from_value(body)?)
}

/// Markup of one menu card.
pub fn card_markup(sandwich: &Sandwich) -> String {
    format!(
        concat!(
            r#"<div class="menu-item-card" data-sandwich-id="{}">"#,
            r#"<h3 class="menu-item-name">{}</h3>"#,
            r#"<p class="menu-item-price">{}</p>"#,
            "</div>"
        ),
        escape_html(&sandwich.id_text()),
        escape_html(&sandwich.display_name()),
        format_price(sandwich.price_value()),
    )
}

fn error_markup(message: &str) -> String {
    format!(
        r#"<p class="error-message">Error: {}</p>"#,
        escape_html(message)
    )
}
