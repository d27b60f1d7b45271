//! Van loading domain models.
//!
//! Provides the data types describing what can be loaded (products and
//! their catalog) and what was loaded (an allocation breakdown).
//!
//! # Domain Mappings
//!
//! | van-load | Knapsack | Retail |
//! |----------|----------|--------|
//! | Product | Item type | SKU |
//! | Catalog | Item set | Assortment |
//! | Allocation | Packing | Order |
//! | Capacity | Weight limit | Van volume |

mod allocation;
mod catalog;
mod product;

pub use allocation::{Allocation, PickedLine};
pub use catalog::Catalog;
pub use product::Product;
