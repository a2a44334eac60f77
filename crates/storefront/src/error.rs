//! Unified error handling for the storefront.
//!
//! Cart-state problems never show up here: corrupt storage and unknown ids
//! are absorbed by the engine. What remains are configuration, catalog,
//! storage I/O, rendering and checkout failures.

use std::path::PathBuf;

use thiserror::Error;

use tiendita_core::{CatalogError, StoreError};

use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog file is not valid YAML of the expected shape.
    #[error("Invalid catalog file {}: {source}", path.display())]
    CatalogFormat {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Catalog content broke a catalog rule.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart storage write failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Checkout was refused or failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
