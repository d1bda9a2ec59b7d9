//! Client-side helpers

pub mod cart;

pub use cart::{Cart, CartItem};
