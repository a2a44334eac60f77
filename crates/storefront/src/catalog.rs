//! Catalog loading.
//!
//! The catalog is configuration, so unlike cart storage a bad catalog file is
//! a hard error reported with its path.

use std::fs;
use std::path::Path;

use tracing::info;

use tiendita_core::{Catalog, CatalogFile};

use crate::error::StorefrontError;

/// Catalog shipped with the binary, used when no file is configured.
const BUILTIN_CATALOG: &str = include_str!("../catalog.yaml");

/// Load the catalog from `path`, or the built-in one when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML of the
/// expected shape, or lists duplicate ids or blank names.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, StorefrontError> {
    let Some(path) = path else {
        return parse_catalog(BUILTIN_CATALOG, Path::new("<built-in>"));
    };

    let raw = fs::read_to_string(path).map_err(|source| StorefrontError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&raw, path)?;
    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Parse catalog YAML. `origin` only labels errors.
///
/// # Errors
///
/// Returns an error if `raw` is not a valid catalog.
pub fn parse_catalog(raw: &str, origin: &Path) -> Result<Catalog, StorefrontError> {
    let file: CatalogFile =
        serde_yaml::from_str(raw).map_err(|source| StorefrontError::CatalogFormat {
            path: origin.to_path_buf(),
            source,
        })?;
    Ok(Catalog::try_from(file)?)
}
