// src/menu/mod.rs
// Menu page: sandwich cards rendered from the API.

mod price;
mod render;

pub use price::format_price;
pub use render::{card_markup, load_menu, MenuOutcome, MENU_CONTAINER_ID};
