//! Checkout command.

use std::io::{self, Write};

use tiendita_storefront::{CheckoutError, CheckoutOutcome, DirectorySurface, checkout};

use super::Shop;

/// Produce the order summary and print the messaging link.
///
/// # Errors
///
/// Returns an error if the cart is empty or the summary cannot be rendered.
pub fn run(shop: &Shop) -> Result<(), Box<dyn std::error::Error>> {
    let surface = DirectorySurface::new(shop.config.summaries_dir());
    let mut stdout = io::stdout().lock();

    match checkout(&shop.engine, &shop.config, &surface) {
        Ok(CheckoutOutcome::Opened { document, link }) => {
            writeln!(stdout, "Order summary saved to {}", document.display())?;
            writeln!(stdout, "Open this link to send your order:")?;
            writeln!(stdout, "{link}")?;
        }
        Ok(CheckoutOutcome::LinkOnly { link, reason }) => {
            writeln!(stdout, "Could not save the order summary ({reason}).")?;
            writeln!(stdout, "You can still send your order directly with this link:")?;
            writeln!(stdout, "{link}")?;
        }
        Err(CheckoutError::EmptyCart) => {
            writeln!(stdout, "Your cart is empty. Add a product before checking out.")?;
            return Err(CheckoutError::EmptyCart.into());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
