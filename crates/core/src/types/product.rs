//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product as listed in the catalog.
///
/// Products are read-only once the catalog is built; the cart copies the
/// fields it needs instead of holding a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Create a new product record.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}
