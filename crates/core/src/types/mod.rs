//! Core value types.

pub mod id;
pub mod price;
pub mod product;

pub use id::ProductId;
pub use price::{CURRENCY_PREFIX, GROUP_SEPARATOR, Price, format_money};
pub use product::Product;
