//! reqwest-backed implementation of [`InventoryApi`]

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{
    ApiError, CheckoutReceipt, CheckoutRequest, ErrorBody, InventoryApi, NewItem, QuantityUpdate,
};
use crate::inventory::Item;

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("swagtrackr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Strip trailing slashes so paths can be appended verbatim
fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Build the error for a non-2xx response, preferring the body's `error` string
fn server_error(status: u16, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Server { status, message }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

async fn read_body(response: reqwest::Response, fallback: &str) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        tracing::debug!("API returned {}: {}", status, body);
        return Err(server_error(status.as_u16(), &body, fallback));
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let body = read_body(response, fallback).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl InventoryApi for HttpApi {
    async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        tracing::debug!("GET /api/items");
        let response = send(self.http.get(self.url("/api/items"))).await?;
        read_json(response, "Failed to load inventory").await
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, ApiError> {
        tracing::debug!("POST /api/items name={}", item.name);
        let response = send(self.http.post(self.url("/api/items")).json(item)).await?;
        read_json(response, "Failed to add item").await
    }

    async fn update_quantity(&self, id: i64, update: &QuantityUpdate) -> Result<Item, ApiError> {
        tracing::debug!("PUT /api/items/{} quantity={}", id, update.quantity);
        let response = send(self.http.put(self.url(&format!("/api/items/{}", id))).json(update)).await?;
        read_json(response, "Failed to update quantity").await
    }

    async fn delete_item(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!("DELETE /api/items/{}", id);
        let response = send(self.http.delete(self.url(&format!("/api/items/{}", id)))).await?;
        // Body is just an acknowledgement message
        read_body(response, "Failed to delete item").await.map(|_| ())
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, ApiError> {
        tracing::debug!("POST /api/checkout name={} amount={}", request.name, request.amount);
        let response = send(self.http.post(self.url("/api/checkout")).json(request)).await?;
        read_json(response, "Failed to checkout items").await
    }
}
