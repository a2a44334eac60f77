//! Display data for templates.
//!
//! Money is formatted here so templates only interpolate strings.

use tiendita_core::{CartEngine, CartEntry, CartStore, Product, ProductId, format_money};

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Units of this product currently in the cart.
    pub in_cart: u32,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, in_cart: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            in_cart,
        }
    }
}

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            quantity: entry.quantity,
            price: entry.price.to_string(),
            line_price: entry.line_subtotal().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_money(0),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: CartStore> From<&CartEngine<S>> for CartView {
    fn from(engine: &CartEngine<S>) -> Self {
        Self {
            items: engine.cart().iter().map(CartItemView::from).collect(),
            subtotal: engine.order_total().to_string(),
            item_count: engine.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tiendita_core::{Catalog, MemoryStore, Price};

    use super::*;

    #[test]
    fn test_cart_view_formats_money() {
        let catalog = Arc::new(
            Catalog::new(vec![
                Product::new(ProductId::new(1), "Mochila", Price::new(12_000), ""),
                Product::new(ProductId::new(2), "Sombrero", Price::new(6_000), ""),
            ])
            .unwrap(),
        );
        let mut engine = CartEngine::load(catalog, MemoryStore::new());
        let _ = engine.add(ProductId::new(1)).unwrap();
        let _ = engine.add(ProductId::new(1)).unwrap();
        let _ = engine.add(ProductId::new(2)).unwrap();

        let view = CartView::from(&engine);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$30.000");
        let first = view.items.first().unwrap();
        assert_eq!(first.price, "$12.000");
        assert_eq!(first.line_price, "$24.000");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0");
    }
}
