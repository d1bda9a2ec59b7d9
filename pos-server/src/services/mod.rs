//! Service layer

pub mod catalog;

pub use catalog::{CatalogService, ProductDeleted};
