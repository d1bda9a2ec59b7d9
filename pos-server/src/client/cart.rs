//! Client Cart
//!
//! Browser-local accumulation of selected products before order
//! submission. The JSON form round-trips losslessly so the cart survives
//! page reloads via a persisted local key; concurrent holders race on
//! last-write-wins semantics, which is acceptable for a single user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::models::{OrderLine, Product};
use crate::utils::money::{line_total, to_f64};

/// One selected product with its accumulated quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// The cart itself, in selection order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product; an already selected product has its
    /// quantity incremented instead of gaining a second line
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }),
        }
    }

    /// Remove one unit of a product; the line disappears at zero
    pub fn remove(&mut self, product_id: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) {
            item.quantity -= 1;
        }
        self.items.retain(|item| item.quantity > 0);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Cart total (Decimal-backed)
    pub fn total(&self) -> f64 {
        let sum: Decimal = self
            .items
            .iter()
            .map(|item| line_total(item.price, item.quantity))
            .sum();
        to_f64(sum)
    }

    /// The `POST /orders` payload for this cart
    pub fn to_lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|item| OrderLine {
                id: item.id,
                quantity: item.quantity,
            })
            .collect()
    }

    /// Serialize for local persistence
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore from local persistence
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
