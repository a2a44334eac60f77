//! Cart commands.
//!
//! Each mutation is followed by a fresh print of the cart, the terminal
//! counterpart of re-rendering after every change.

use std::io::{self, BufRead, Write};

use tiendita_core::{CartEngine, CartStore, Change, ProductId, StoreError};
use tiendita_storefront::FileStore;

use super::Shop;

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart could not be saved.
pub fn add(shop: &mut Shop, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    mutate(shop, |engine| engine.add(id))
}

/// Add one unit to a product already in the cart.
///
/// # Errors
///
/// Returns an error if the cart could not be saved.
pub fn increment(shop: &mut Shop, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    mutate(shop, |engine| engine.increment(id))
}

/// Take one unit off a product in the cart.
///
/// # Errors
///
/// Returns an error if the cart could not be saved.
pub fn decrement(shop: &mut Shop, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    mutate(shop, |engine| engine.decrement(id))
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart could not be saved.
pub fn remove(shop: &mut Shop, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    mutate(shop, |engine| engine.remove(id))
}

/// Empty the cart, asking first unless `yes` is set.
///
/// # Errors
///
/// Returns an error if the prompt cannot be read or the cart could not be
/// saved.
pub fn clear(shop: &mut Shop, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes && !confirm("Empty the whole cart? [y/N] ")? {
        writeln!(io::stdout().lock(), "Cart left unchanged.")?;
        return Ok(());
    }
    mutate(shop, CartEngine::clear)
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn show(shop: &Shop) -> Result<(), Box<dyn std::error::Error>> {
    write_cart(&mut io::stdout().lock(), &shop.engine)?;
    Ok(())
}

fn mutate<F>(shop: &mut Shop, op: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut CartEngine<FileStore>) -> Result<Change, StoreError>,
{
    let _ = op(&mut shop.engine)?;
    show(shop)
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    ))
}

/// Plain-text cart listing.
pub fn write_cart<S: CartStore>(out: &mut impl Write, engine: &CartEngine<S>) -> io::Result<()> {
    let entries = engine.entries();
    if entries.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    writeln!(out, "Cart ({} items)", engine.item_count())?;
    for entry in &entries {
        writeln!(
            out,
            "  [{:>3}] {:<width$}  {:>3} x {:>10} = {:>12}",
            entry.id,
            entry.name,
            entry.quantity,
            entry.price.to_string(),
            entry.line_subtotal().to_string(),
        )?;
    }
    writeln!(out, "Total: {}", engine.order_total())
}
