// src/api/client.rs
// =============================================================================
// Read-only helpers for the sandwich shop REST API.
//
// Endpoints (relative to the API base URL):
// - orders/     -> list of orders
// - reviews/    -> list of reviews
// - sandwiches  -> the menu
//
// get_orders / get_reviews never fail from the caller's point of view:
// any problem is logged and they hand back None. A body that parses is
// handed back as it arrived, whatever its shape.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::{ClientError, Result};

/// Where the API runs during local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // Without a trailing slash, join() would drop the last path segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetches the orders, or None if anything went wrong.
    pub async fn get_orders(&self) -> Option<Value> {
        match self.get_json("orders/").await {
            Ok(orders) => Some(orders),
            Err(e) => {
                error!(error = %e, "failed to fetch orders");
                None
            }
        }
    }

    /// Fetches the reviews, or None if anything went wrong.
    pub async fn get_reviews(&self) -> Option<Value> {
        match self.get_json("reviews/").await {
            Ok(reviews) => Some(reviews),
            Err(e) => {
                error!(error = %e, "failed to fetch reviews");
                None
            }
        }
    }

    /// Raw menu response. The menu renderer checks the shape itself so it
    /// can report a non-array body with its own message.
    pub async fn fetch_sandwiches(&self) -> Result<Value> {
        self.get_json("sandwiches").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        debug!(%url, "GET");

        // Content-Type on a GET does nothing, but the API has always been
        // called this way
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
