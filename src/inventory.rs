//! Inventory data model and the in-memory application state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Items at or below this quantity (but above zero) are flagged as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
}

impl Item {
    pub fn status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }
}

/// Display-only stock classification derived from quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate numbers shown above the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_items: usize,
    pub total_quantity: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventoryStats {
    pub fn from_items(items: &[Item]) -> Self {
        items.iter().fold(Self::default(), |mut stats, item| {
            stats.total_items += 1;
            stats.total_quantity += u64::from(item.quantity);
            match item.status() {
                StockStatus::LowStock => stats.low_stock += 1,
                StockStatus::OutOfStock => stats.out_of_stock += 1,
                StockStatus::InStock => {}
            }
            stats
        })
    }
}

/// The item list as last returned by the server.
///
/// Always replaced wholesale on a successful load, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
    loaded: bool,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.loaded = true;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether at least one load has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Resolve an item by its display name (names are unique server-side)
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_items(&self.items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an item name")]
    EmptyName,
    #[error("Please enter a valid quantity")]
    InvalidQuantity,
    #[error("Please enter a valid amount")]
    InvalidAmount,
}

/// Trimmed, non-empty item name
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Non-negative integer quantity
pub fn parse_quantity(input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity)
}

/// Strictly positive checkout amount
pub fn parse_amount(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}
