//! In-memory stand-in for the SwagTrackr server, used by tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ApiError, CheckoutReceipt, CheckoutRequest, InventoryApi, NewItem, QuantityUpdate};
use crate::inventory::Item;

#[derive(Default)]
pub struct FakeApi {
    items: Mutex<Vec<Item>>,
    next_id: AtomicUsize,
    offline: AtomicBool,
    last_checkout: Mutex<Option<CheckoutRequest>>,
    pub list_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) as usize + 1;
        Self {
            items: Mutex::new(items),
            next_id: AtomicUsize::new(next_id),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn mutations(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Most recent checkout request as received
    pub fn last_checkout(&self) -> Option<CheckoutRequest> {
        self.last_checkout.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn bad_request(message: &str) -> ApiError {
        ApiError::Server { status: 400, message: message.to_string() }
    }

    fn not_found() -> ApiError {
        ApiError::Server { status: 404, message: "Item not found".to_string() }
    }
}

#[async_trait]
impl InventoryApi for FakeApi {
    async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let mut items = self.snapshot();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create_item(&self, new: &NewItem) -> Result<Item, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if new.name.trim().is_empty() {
            return Err(Self::bad_request("Item name is required"));
        }
        let mut items = self.items.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|i| i.name == new.name) {
            existing.quantity += new.quantity;
            return Ok(existing.clone());
        }
        let item = Item {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) as i64,
            name: new.name.clone(),
            quantity: new.quantity,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn update_quantity(&self, id: i64, update: &QuantityUpdate) -> Result<Item, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let mut items = self.items.lock().unwrap();
        let item = items.iter_mut().find(|i| i.id == id).ok_or_else(Self::not_found)?;
        item.quantity = update.quantity;
        Ok(item.clone())
    }

    async fn delete_item(&self, id: i64) -> Result<(), ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, ApiError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        *self.last_checkout.lock().unwrap() = Some(request.clone());
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.name == request.name)
            .ok_or_else(|| Self::bad_request("Item not found"))?;
        if item.quantity < request.amount {
            return Err(Self::bad_request("Insufficient stock"));
        }
        item.quantity -= request.amount;
        Ok(CheckoutReceipt {
            id: Some(item.id),
            name: item.name.clone(),
            checked_out: request.amount,
            quantity: item.quantity,
        })
    }
}
