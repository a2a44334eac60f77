//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One line of the cart.
///
/// `name` and `price` are copied from the catalog when the entry is created
/// and never refreshed, so a later catalog price change does not re-price an
/// item that is already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Always at least 1 while the entry is stored.
    pub quantity: u32,
}

impl CartEntry {
    /// Snapshot a catalog product with quantity 0.
    ///
    /// The cart bumps the quantity immediately; a zero-quantity entry is never
    /// stored.
    pub(crate) fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 0,
        }
    }

    /// `quantity * price`.
    #[must_use]
    pub fn line_subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}
