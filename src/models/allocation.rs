//! Allocation breakdown.
//!
//! Turns a quantity vector into the figures a report needs: what was
//! picked, how much it is worth, how much room it takes, and whether it
//! actually fits.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total value | Sum of quantity x unit value |
//! | Total volume | Sum of quantity x unit volume |
//! | Overflow | max(0, total volume - capacity) |
//! | Fill rate | total volume / capacity |

use serde::{Deserialize, Serialize};

use super::Catalog;

/// One catalog line of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedLine {
    /// Product name.
    pub product: String,
    /// Units picked.
    pub quantity: u32,
    /// Value contributed by this line.
    pub value: f64,
    /// Volume occupied by this line.
    pub volume: f64,
}

/// Value and volume breakdown of a chromosome against a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Picked quantity per product, aligned with catalog order.
    pub quantities: Vec<u32>,
    /// Per-product lines, aligned with catalog order.
    pub lines: Vec<PickedLine>,
    /// Sum of line values.
    pub total_value: f64,
    /// Sum of line volumes.
    pub total_volume: f64,
    /// Van capacity the allocation was checked against.
    pub capacity: f64,
}

impl Allocation {
    /// Computes the breakdown of `quantities` against `catalog`.
    pub fn calculate(catalog: &Catalog, quantities: &[u32], capacity: f64) -> Self {
        let lines: Vec<PickedLine> = catalog
            .iter()
            .zip(quantities)
            .map(|(product, &quantity)| PickedLine {
                product: product.name.clone(),
                quantity,
                value: product.value_of(quantity),
                volume: product.volume_of(quantity),
            })
            .collect();

        Self {
            quantities: quantities.to_vec(),
            total_value: lines.iter().map(|l| l.value).sum(),
            total_volume: lines.iter().map(|l| l.volume).sum(),
            lines,
            capacity,
        }
    }

    /// Whether the allocation fits in the van.
    pub fn is_feasible(&self) -> bool {
        self.total_volume <= self.capacity
    }

    /// Volume exceeding the capacity (0 when feasible).
    pub fn overflow(&self) -> f64 {
        (self.total_volume - self.capacity).max(0.0)
    }

    /// Fraction of the capacity in use (may exceed 1.0).
    pub fn fill_rate(&self) -> f64 {
        self.total_volume / self.capacity
    }

    /// Lines with a non-zero quantity.
    pub fn picked(&self) -> impl Iterator<Item = &PickedLine> {
        self.lines.iter().filter(|l| l.quantity > 0)
    }
}
