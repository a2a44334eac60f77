//! Shop page rendering.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use tiendita_core::SortOrder;
use tiendita_storefront::render::render_shop;

use super::Shop;

/// Render the shop page to `out`, or stdout when `out` is `None`.
///
/// # Errors
///
/// Returns an error if rendering fails or the output cannot be written.
pub fn page(
    shop: &Shop,
    out: Option<&Path>,
    search: &str,
    order: SortOrder,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = render_shop(&shop.engine, &shop.config.shop_name, search, order)?;

    match out {
        Some(path) => {
            fs::write(path, html)?;
            info!(path = %path.display(), "Shop page written");
        }
        None => io::stdout().lock().write_all(html.as_bytes())?,
    }
    Ok(())
}
