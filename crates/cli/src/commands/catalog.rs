//! Catalog listing.

use std::io::{self, Write};

use tiendita_core::{CartEngine, CartStore, SortOrder};
use tiendita_storefront::render::product_views;

use super::Shop;

/// Print products matching `search`, in `order`.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn list(
    shop: &Shop,
    search: &str,
    order: SortOrder,
) -> Result<(), Box<dyn std::error::Error>> {
    write_catalog(&mut io::stdout().lock(), &shop.engine, search, order)?;
    Ok(())
}

fn write_catalog<S: CartStore>(
    out: &mut impl Write,
    engine: &CartEngine<S>,
    search: &str,
    order: SortOrder,
) -> io::Result<()> {
    let products = product_views(engine, search, order);
    if products.is_empty() {
        return writeln!(out, "No products match your search.");
    }

    for product in &products {
        write!(out, "[{:>3}] {}  {}", product.id, product.name, product.price)?;
        if product.in_cart > 0 {
            write!(out, "  ({} in cart)", product.in_cart)?;
        }
        writeln!(out)?;
        if !product.description.is_empty() {
            writeln!(out, "      {}", product.description)?;
        }
    }
    Ok(())
}
