//! Order Enrichment Engine
//!
//! Joins each stored order's bare (product id, quantity) pairs against the
//! catalog (soft-deleted products included) to produce display-ready line
//! items. Inputs are never mutated; output order follows input order.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::models::{Category, Order, Product};
use crate::utils::money::line_total;

/// A line item joined against the catalog
///
/// Resolution fields are absent when the product id no longer resolves.
/// Under current delete rules that cannot happen (referenced products are
/// tombstoned, not removed), but a dangling reference must not break the
/// order list.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedLine {
    pub id: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An order with its line items joined against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedOrder {
    pub id: i64,
    pub created_at: i64,
    pub note: Option<String>,
    pub product_data: Vec<EnrichedLine>,
}

impl EnrichedOrder {
    /// Order total as a Decimal (unresolved lines contribute nothing)
    pub fn total(&self) -> Decimal {
        self.product_data
            .iter()
            .filter_map(|line| line.price.map(|price| line_total(price, line.quantity)))
            .sum()
    }
}

/// Enrich orders against the full product set
///
/// Line order follows each order's serialized sequence; a malformed blob
/// yields an empty line sequence for that order (see
/// [`crate::db::models::parse_lines`]).
pub fn enrich_orders(orders: &[Order], products: &[Product]) -> Vec<EnrichedOrder> {
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    orders
        .iter()
        .map(|order| EnrichedOrder {
            id: order.id,
            created_at: order.created_at,
            note: order.note.clone(),
            product_data: order
                .lines()
                .iter()
                .map(|line| match by_id.get(&line.id) {
                    Some(product) => EnrichedLine {
                        id: line.id,
                        quantity: line.quantity,
                        name: Some(product.name.clone()),
                        price: Some(product.price),
                        category: Some(product.category),
                        image: product.image.clone(),
                    },
                    None => EnrichedLine {
                        id: line.id,
                        quantity: line.quantity,
                        name: None,
                        price: None,
                        category: None,
                        image: None,
                    },
                })
                .collect(),
        })
        .collect()
}
