//! Integration tests for Tiendita.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tiendita-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - engine driven against the file store across restarts
//! - `checkout_flow` - cart to order summary to messaging link
//!
//! Shared fixtures live here.

use std::path::Path;
use std::sync::Arc;

use tiendita_core::{CartEngine, Catalog, Price, Product, ProductId};
use tiendita_storefront::FileStore;

pub const MOCHILA: ProductId = ProductId::new(1);
pub const SOMBRERO: ProductId = ProductId::new(2);
pub const HAMACA: ProductId = ProductId::new(3);

/// Three-product catalog used across tests.
///
/// # Panics
///
/// Never: the fixture products have unique ids and names.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Product::new(MOCHILA, "Mochila Wayuu", Price::new(12_000), "Tejida a mano"),
            Product::new(SOMBRERO, "Sombrero vueltiao", Price::new(6_000), "Caña flecha"),
            Product::new(HAMACA, "Hamaca", Price::new(45_000), "Algodón"),
        ])
        .unwrap(),
    )
}

/// Open an engine over the storage file in `dir`, as a fresh process would.
#[must_use]
pub fn open_engine(dir: &Path) -> CartEngine<FileStore> {
    open_engine_with(dir, catalog())
}

/// Like [`open_engine`] with a custom catalog.
#[must_use]
pub fn open_engine_with(dir: &Path, catalog: Arc<Catalog>) -> CartEngine<FileStore> {
    CartEngine::load(catalog, FileStore::new(dir.join("storage.json")))
}
