//! Order Model
//!
//! Orders are immutable once created. Line items are persisted as a JSON
//! array of `{id, quantity}` objects in the `product_data` column; the
//! round-trip through [`serialize_lines`] / [`parse_lines`] is lossless.

use serde::{Deserialize, Serialize};

/// A single (product, quantity) line as submitted by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub quantity: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    /// Serialized line items (JSON array of [`OrderLine`])
    pub product_data: String,
    pub note: Option<String>,
    /// Unix millis
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub product_data: Vec<OrderLine>,
    pub note: Option<String>,
}

/// Serialize line items to the stored JSON form
pub fn serialize_lines(lines: &[OrderLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Parse stored line items, failing soft
///
/// Malformed blobs yield an empty sequence: a single corrupt order must
/// never take down enrichment of the whole order list.
pub fn parse_lines(raw: &str) -> Vec<OrderLine> {
    match serde_json::from_str(raw) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed order line items, treating as empty");
            Vec::new()
        }
    }
}

impl Order {
    /// Parsed line items (fail-soft)
    pub fn lines(&self) -> Vec<OrderLine> {
        parse_lines(&self.product_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_roundtrip_lossless() {
        let lines = vec![
            OrderLine { id: 3, quantity: 2 },
            OrderLine { id: 1, quantity: 1 },
            OrderLine { id: 3, quantity: 5 },
        ];
        let raw = serialize_lines(&lines).unwrap();
        assert_eq!(parse_lines(&raw), lines, "order and values preserved");
    }

    #[test]
    fn test_malformed_blob_parses_as_empty() {
        assert!(parse_lines("not json").is_empty());
        assert!(parse_lines("{\"id\":1}").is_empty());
        assert!(parse_lines("").is_empty());
    }

    #[test]
    fn test_empty_array_roundtrip() {
        assert_eq!(parse_lines(&serialize_lines(&[]).unwrap()), vec![]);
    }
}
