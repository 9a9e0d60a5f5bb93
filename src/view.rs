//! View-model for the inventory table.
//!
//! Rendering code only ever sees these rows, never raw server strings.

use crate::inventory::{Inventory, InventoryStats, StockStatus};

pub const EMPTY_MESSAGE: &str = "No items in inventory. Add your first item to get started!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: i64,
    /// Raw name, used for API calls and lookups
    pub name: String,
    /// Name safe to draw on a terminal
    pub display_name: String,
    pub quantity: u32,
    pub status: StockStatus,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    pub rows: Vec<ItemRow>,
    pub stats: InventoryStats,
    pub loaded: bool,
}

impl InventoryView {
    pub fn build(inventory: &Inventory) -> Self {
        let rows = inventory
            .items()
            .iter()
            .map(|item| ItemRow {
                id: item.id,
                name: item.name.clone(),
                display_name: sanitize(&item.name),
                quantity: item.quantity,
                status: item.status(),
            })
            .collect();

        Self {
            rows,
            stats: inventory.stats(),
            loaded: inventory.is_loaded(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Escape {
    None,
    /// Just saw ESC
    Start,
    /// `ESC [` ... final byte
    Csi,
    /// `ESC ]` ... BEL or ST
    Osc,
}

/// Strip ANSI escape sequences and control characters from user-supplied text
pub fn sanitize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut state = Escape::None;

    for c in s.chars() {
        state = match state {
            _ if c == '\x1b' => Escape::Start,
            Escape::Start => match c {
                '[' => Escape::Csi,
                ']' => Escape::Osc,
                // Two-character escape (including the `\` of ST)
                _ => Escape::None,
            },
            Escape::Csi if ('@'..='~').contains(&c) => Escape::None,
            Escape::Csi => Escape::Csi,
            Escape::Osc if c == '\x07' => Escape::None,
            Escape::Osc => Escape::Osc,
            Escape::None => {
                if c == '\n' || c == '\t' {
                    result.push(' ');
                } else if !c.is_control() {
                    result.push(c);
                }
                Escape::None
            }
        };
    }
    result
}
