//! Command implementations.
//!
//! Every command opens the [`Shop`]: configuration, catalog, and the cart
//! engine restored from the storage file.

use std::sync::Arc;

use tracing::debug;

use tiendita_core::CartEngine;
use tiendita_storefront::{FileStore, StorefrontConfig, StorefrontError, load_catalog};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod render;

/// Loaded configuration plus the cart engine.
pub struct Shop {
    pub config: StorefrontConfig,
    pub engine: CartEngine<FileStore>,
}

impl Shop {
    /// Load configuration and catalog, then restore the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the catalog is invalid. Storage
    /// problems never fail here; they start an empty cart.
    pub fn open() -> Result<Self, StorefrontError> {
        let config = StorefrontConfig::from_env()?;
        let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);
        let store = FileStore::new(config.storage_path());
        debug!(storage = %store.path().display(), "Opening cart storage");

        Ok(Self {
            engine: CartEngine::load(catalog, store),
            config,
        })
    }
}
