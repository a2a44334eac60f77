//! Catalog and cart rendering.
//!
//! The rendering surface re-queries the engine after every mutation and
//! renders from scratch; nothing here holds state.

use askama::Template;

use tiendita_core::{CartEngine, CartStore, Catalog, SortOrder};

use crate::filters;
use crate::views::{CartView, ProductView};

/// Product list fragment.
#[derive(Template)]
#[template(path = "partials/catalog.html", escape = "none")]
pub struct CatalogTemplate {
    pub products: Vec<ProductView>,
}

/// Cart list fragment, including the count badge and total.
#[derive(Template)]
#[template(path = "partials/cart.html", escape = "none")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Full shop page: product list next to the cart.
#[derive(Template)]
#[template(path = "shop.html", escape = "none")]
pub struct ShopPageTemplate {
    pub shop_name: String,
    pub query: String,
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

/// Products matching `query`, in `order`, annotated with cart quantities.
#[must_use]
pub fn product_views<S: CartStore>(
    engine: &CartEngine<S>,
    query: &str,
    order: SortOrder,
) -> Vec<ProductView> {
    Catalog::sorted(engine.catalog().search(query), order)
        .into_iter()
        .map(|product| ProductView::new(product, engine.quantity(product.id)))
        .collect()
}

/// Render the whole shop page.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_shop<S: CartStore>(
    engine: &CartEngine<S>,
    shop_name: &str,
    query: &str,
    order: SortOrder,
) -> Result<String, askama::Error> {
    ShopPageTemplate {
        shop_name: shop_name.to_string(),
        query: query.to_string(),
        products: product_views(engine, query, order),
        cart: CartView::from(engine),
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tiendita_core::{MemoryStore, Price, Product, ProductId};

    use super::*;

    fn engine() -> CartEngine<MemoryStore> {
        let catalog = Catalog::new(vec![
            Product::new(
                ProductId::new(1),
                "Mochila <script>",
                Price::new(12_000),
                "Tom & Jerry's \"best\"",
            ),
            Product::new(ProductId::new(2), "Sombrero", Price::new(6_000), "Caña flecha"),
        ])
        .unwrap();
        CartEngine::load(Arc::new(catalog), MemoryStore::new())
    }

    #[test]
    fn test_catalog_fragment_escapes_catalog_text() {
        let html = CatalogTemplate {
            products: product_views(&engine(), "", SortOrder::Catalog),
        }
        .render()
        .unwrap();

        assert!(html.contains("Mochila &lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry&#39;s &quot;best&quot;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("$12.000"));
    }

    #[test]
    fn test_catalog_fragment_empty_state() {
        let html = CatalogTemplate {
            products: product_views(&engine(), "no such thing", SortOrder::Catalog),
        }
        .render()
        .unwrap();
        assert!(html.contains("No products match"));
    }

    #[test]
    fn test_cart_fragment_shows_items_and_total() {
        let mut engine = engine();
        let _ = engine.add(ProductId::new(1)).unwrap();
        let _ = engine.add(ProductId::new(1)).unwrap();
        let _ = engine.add(ProductId::new(2)).unwrap();

        let html = CartTemplate {
            cart: CartView::from(&engine),
        }
        .render()
        .unwrap();

        assert!(html.contains("Mochila &lt;script&gt;"));
        assert!(html.contains("$24.000"));
        assert!(html.contains("$30.000"));
        assert!(html.contains(r#"data-count="3""#));
    }

    #[test]
    fn test_cart_fragment_empty_state() {
        let html = CartTemplate {
            cart: CartView::empty(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Your cart is empty"));
    }

    #[test]
    fn test_shop_page_escapes_query_and_shop_name() {
        let html = render_shop(&engine(), "<Tienda>", "\"x\"", SortOrder::Catalog).unwrap();
        assert!(html.contains("&lt;Tienda&gt;"));
        assert!(html.contains("&quot;x&quot;"));
    }

    #[test]
    fn test_product_views_sorted_with_cart_quantities() {
        let mut engine = engine();
        let _ = engine.add(ProductId::new(2)).unwrap();

        let views = product_views(&engine, "", SortOrder::PriceAsc);
        let ids: Vec<u32> = views.iter().map(|v| v.id.as_u32()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(views.first().unwrap().in_cart, 1);
    }
}
