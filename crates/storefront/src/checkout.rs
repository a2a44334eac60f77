//! Checkout: hand the order off to the messaging channel.
//!
//! Checkout reads the cart, refuses an empty one, builds the order summary,
//! and tries to open the summary document on a [`SummarySurface`]. When the
//! surface cannot be opened the caller gets the messaging link alone and is
//! expected to follow it directly. The cart is left untouched either way.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use tiendita_core::{CartEngine, CartStore};

use crate::config::StorefrontConfig;
use crate::summary::OrderSummary;

/// Why checkout could not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("your cart is empty, add a product before checking out")]
    EmptyCart,

    /// The summary document failed to render.
    #[error("failed to render order summary: {0}")]
    Render(#[from] askama::Error),
}

/// Why the summary document could not be shown.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("could not write summary document: {0}")]
    Io(#[from] std::io::Error),

    #[error("summary surface blocked: {0}")]
    Blocked(String),
}

/// Somewhere the order summary document can be opened for the user.
pub trait SummarySurface {
    /// Show `document` and return where it can be found.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be shown.
    fn open(&self, summary: &OrderSummary, document: &str) -> Result<PathBuf, SurfaceError>;
}

/// Writes summary documents as HTML files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySurface {
    dir: PathBuf,
}

impl DirectorySurface {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SummarySurface for DirectorySurface {
    fn open(&self, summary: &OrderSummary, document: &str) -> Result<PathBuf, SurfaceError> {
        fs::create_dir_all(&self.dir)?;
        let name = format!(
            "order-{}.html",
            summary.generated_at.format("%Y%m%d-%H%M%S%.3f")
        );
        let path = self.dir.join(name);
        fs::write(&path, document)?;
        Ok(path)
    }
}

/// Result of a successful checkout.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The summary document was opened; the link is also available.
    Opened { document: PathBuf, link: String },
    /// The document could not be opened; follow the link directly.
    LinkOnly { link: String, reason: SurfaceError },
}

impl CheckoutOutcome {
    /// The messaging link, whichever way checkout went.
    #[must_use]
    pub fn link(&self) -> &str {
        match self {
            Self::Opened { link, .. } | Self::LinkOnly { link, .. } => link,
        }
    }
}

/// Produce the order summary and hand it off.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` before producing anything if the cart
/// is empty, or `CheckoutError::Render` if the document fails to render.
#[instrument(skip_all)]
pub fn checkout<S: CartStore>(
    engine: &CartEngine<S>,
    config: &StorefrontConfig,
    surface: &impl SummarySurface,
) -> Result<CheckoutOutcome, CheckoutError> {
    let summary = OrderSummary::build(
        &engine.entries(),
        engine.order_total(),
        &config.shop_name,
        Utc::now(),
    )?;

    let link = summary.message_link(&config.messaging);
    let document = summary.render_document(&link)?;

    match surface.open(&summary, &document) {
        Ok(path) => {
            info!(
                document = %path.display(),
                items = summary.item_count,
                total = %summary.total,
                "Order summary opened"
            );
            Ok(CheckoutOutcome::Opened {
                document: path,
                link,
            })
        }
        Err(reason) => {
            warn!(error = %reason, "Could not open order summary, falling back to link");
            Ok(CheckoutOutcome::LinkOnly { link, reason })
        }
    }
}
