//! Product model.
//!
//! A product is one line of the catalog: something that can be bought and
//! loaded into the van, in whole units, up to an available quantity.

use serde::{Deserialize, Serialize};

/// A purchasable product.
///
/// Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product name.
    pub name: String,
    /// Value of one unit (positive).
    pub unit_value: f64,
    /// Volume one unit occupies in the van (positive).
    pub unit_volume: f64,
    /// Maximum number of units that may be picked.
    pub max_quantity: u32,
}

impl Product {
    /// Creates a new product.
    pub fn new(name: impl Into<String>, unit_value: f64, unit_volume: f64, max_quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_value,
            unit_volume,
            max_quantity,
        }
    }

    /// Value of `quantity` units.
    pub fn value_of(&self, quantity: u32) -> f64 {
        quantity as f64 * self.unit_value
    }

    /// Volume of `quantity` units.
    pub fn volume_of(&self, quantity: u32) -> f64 {
        quantity as f64 * self.unit_volume
    }

    /// Value per unit of volume.
    pub fn density(&self) -> f64 {
        self.unit_value / self.unit_volume
    }
}
