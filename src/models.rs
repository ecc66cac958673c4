//! Frontend Models
//!
//! Data structures matching the grocery backend's JSON contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement unit for a grocery item quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Pieces,
    Packs,
    Kg,
    Liters,
}

impl Unit {
    /// All units, in the order the `<select>` options render.
    pub const ALL: [Unit; 4] = [Unit::Pieces, Unit::Packs, Unit::Kg, Unit::Liters];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieces => "Pieces",
            Unit::Packs => "Packs",
            Unit::Kg => "Kg",
            Unit::Liters => "Liters",
        }
    }

    /// Parse a `<select>` option value back into a unit.
    pub fn from_str(value: &str) -> Option<Unit> {
        match value {
            "Pieces" => Some(Unit::Pieces),
            "Packs" => Some(Unit::Packs),
            "Kg" => Some(Unit::Kg),
            "Liters" => Some(Unit::Liters),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grocery item data structure (matches backend).
///
/// The `id` is server-assigned and opaque; the frontend never invents one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    pub purchased: bool,
}

/// The fields needed to create an item, also used as the per-row edit buffer
/// and the PUT body on save. Excludes `id` and `purchased`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            quantity: 1.0,
            unit: Unit::default(),
        }
    }
}

impl ItemDraft {
    /// Seed an edit buffer from an existing item.
    pub fn from_item(item: &GroceryItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit,
        }
    }
}

/// One paginated slice of the grocery collection (matches backend).
///
/// `next`/`previous` are opaque links and may be empty; the UI paginates via
/// `current_page`/`total_pages` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub count: u32,
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub previous: String,
    pub results: Vec<GroceryItem>,
}
