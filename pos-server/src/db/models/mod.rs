//! Database Models

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderCreate, OrderLine, parse_lines, serialize_lines};
pub use product::{Category, Product, ProductCreate};
pub use user::User;
