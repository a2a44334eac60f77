//! Tiendita Core - catalog and cart state engine.
//!
//! This crate holds the state that matters in Tiendita: which products are on
//! offer and what the shopper has selected. It is used by:
//! - `storefront` - rendering, file storage, order summary and checkout
//! - `cli` - the command-line shop front
//!
//! # Architecture
//!
//! No rendering and no filesystem access live here. Storage is abstracted
//! behind [`CartStore`], so the engine can be driven against memory in tests
//! and against a file in the CLI.
//!
//! # Modules
//!
//! - [`types`] - product ids, whole-unit prices and money formatting
//! - [`catalog`] - the read-only product list, search and sort
//! - [`cart`] - cart state, the persistence codec and [`CartEngine`]
//! - [`store`] - the key/value storage seam
//! - [`escape`] - markup escaping for displayed text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod escape;
pub mod store;
pub mod types;

pub use cart::{CART_STORAGE_KEY, Cart, CartEngine, CartEntry, Change};
pub use catalog::{Catalog, CatalogError, CatalogFile, SortOrder};
pub use escape::escape_text;
pub use store::{CartStore, MemoryStore, StoreError};
pub use types::*;
