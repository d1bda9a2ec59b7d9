//! Product Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed menu categories
///
/// The catalog is partitioned into exactly four categories; anything else is
/// rejected at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Category {
    Boissons,
    Nourriture,
    Desserts,
    Collations,
}

impl Category {
    /// All valid categories, in menu display order
    pub const ALL: [Category; 4] = [
        Category::Boissons,
        Category::Nourriture,
        Category::Desserts,
        Category::Collations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Boissons => "Boissons",
            Category::Nourriture => "Nourriture",
            Category::Desserts => "Desserts",
            Category::Collations => "Collations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boissons" => Ok(Category::Boissons),
            "Nourriture" => Ok(Category::Nourriture),
            "Desserts" => Ok(Category::Desserts),
            "Collations" => Ok(Category::Collations),
            other => Err(format!("Invalid category: {}", other)),
        }
    }
}

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub price: f64,
    /// Stored asset reference (e.g. "/uploads/<uuid>.jpg")
    pub image: Option<String>,
    /// Soft-delete tombstone: excluded from active listings,
    /// still resolvable for historic order enrichment
    pub is_deleted: bool,
    /// Unix millis
    pub created_at: i64,
}

/// Create product payload (validated form fields + stored image ref)
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub image: Option<String>,
}
