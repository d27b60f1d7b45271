//! Product catalog.
//!
//! The ordered product list a run works against. Gene `i` of every
//! chromosome is the quantity of `catalog[i]`, so the order is fixed for
//! the lifetime of a run.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Product;
use crate::validation::{validate_products, ConfigError};

/// A validated, non-empty, ordered list of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists, duplicate names and
    /// non-positive values or volumes.
    pub fn new(products: Vec<Product>) -> Result<Self, ConfigError> {
        validate_products(&products)?;
        Ok(Self { products })
    }

    /// Number of products (= chromosome length).
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in gene order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterates over products in gene order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Per-gene upper bounds.
    pub fn max_quantities(&self) -> Vec<u32> {
        self.products.iter().map(|p| p.max_quantity).collect()
    }

    /// Looks up a product by name.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Total value of a quantity vector.
    pub fn total_value(&self, quantities: &[u32]) -> f64 {
        self.products
            .iter()
            .zip(quantities)
            .map(|(p, &q)| p.value_of(q))
            .sum()
    }

    /// Total volume of a quantity vector.
    pub fn total_volume(&self, quantities: &[u32]) -> f64 {
        self.products
            .iter()
            .zip(quantities)
            .map(|(p, &q)| p.volume_of(q))
            .sum()
    }
}

impl Index<usize> for Catalog {
    type Output = Product;

    fn index(&self, index: usize) -> &Product {
        &self.products[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = ConfigError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}
