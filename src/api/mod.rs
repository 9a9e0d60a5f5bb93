pub mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::inventory::Item;

pub use http::HttpApi;

/// Failure of a single API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    /// Non-2xx response; `message` is the body's `error` string when present
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub amount: u32,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub checked_out: u32,
    /// Remaining quantity after the checkout
    pub quantity: u32,
}

/// Error body returned by the server on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// The SwagTrackr REST API as seen by the client.
///
/// Every call is a single attempt: no retries, no backoff.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /api/items`
    async fn list_items(&self) -> Result<Vec<Item>, ApiError>;

    /// `POST /api/items`
    async fn create_item(&self, item: &NewItem) -> Result<Item, ApiError>;

    /// `PUT /api/items/{id}`
    async fn update_quantity(&self, id: i64, update: &QuantityUpdate) -> Result<Item, ApiError>;

    /// `DELETE /api/items/{id}`
    async fn delete_item(&self, id: i64) -> Result<(), ApiError>;

    /// `POST /api/checkout`
    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, ApiError>;
}
