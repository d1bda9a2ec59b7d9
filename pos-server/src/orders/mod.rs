//! Order domain logic

pub mod enrich;

pub use enrich::{EnrichedLine, EnrichedOrder, enrich_orders};
