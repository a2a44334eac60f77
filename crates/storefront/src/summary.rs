//! Order summary producer.
//!
//! Turns a cart snapshot into the two checkout artifacts: an HTML document
//! with an order table, and a plain-text message percent-encoded into a
//! messaging link. Nothing here mutates the cart.

use std::fmt::Write as _;

use askama::Template;
use chrono::{DateTime, Utc};

use tiendita_core::{CartEntry, Price};

use crate::checkout::CheckoutError;
use crate::config::MessagingConfig;
use crate::filters;

/// One row of the order table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub subtotal: Price,
}

impl From<&CartEntry> for SummaryLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            name: entry.name.clone(),
            quantity: entry.quantity,
            unit_price: entry.price,
            subtotal: entry.line_subtotal(),
        }
    }
}

/// A finished order ready to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub shop_name: String,
    pub lines: Vec<SummaryLine>,
    pub item_count: u64,
    pub total: Price,
    pub generated_at: DateTime<Utc>,
}

/// HTML order summary document.
#[derive(Template)]
#[template(path = "order_summary.html", escape = "none")]
struct SummaryDocument<'a> {
    summary: &'a OrderSummary,
    message_link: &'a str,
}

impl OrderSummary {
    /// Build a summary from a cart snapshot and its total.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if `entries` is empty.
    pub fn build(
        entries: &[CartEntry],
        total: Price,
        shop_name: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, CheckoutError> {
        if entries.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            shop_name: shop_name.to_string(),
            lines: entries.iter().map(SummaryLine::from).collect(),
            item_count: entries
                .iter()
                .map(|entry| u64::from(entry.quantity))
                .fold(0, u64::saturating_add),
            total,
            generated_at,
        })
    }

    /// Generation time as shown to people.
    #[must_use]
    pub fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    /// Plain-text order message.
    #[must_use]
    pub fn message_text(&self) -> String {
        let mut text = format!("Hello {}! I would like to order:\n", self.shop_name);
        for line in &self.lines {
            // Writing to a String cannot fail.
            let _ = writeln!(
                text,
                "- {} x {} ({}) = {}",
                line.quantity, line.name, line.unit_price, line.subtotal
            );
        }
        let _ = write!(text, "Total: {}", self.total);
        text
    }

    /// Messaging link with the order message pre-filled.
    #[must_use]
    pub fn message_link(&self, messaging: &MessagingConfig) -> String {
        let text = urlencoding::encode(&self.message_text()).into_owned();
        match &messaging.phone {
            Some(phone) => format!("{}/{phone}?text={text}", messaging.base_url),
            None => format!("{}/?text={text}", messaging.base_url),
        }
    }

    /// Render the HTML order document, linking to `message_link`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_document(&self, message_link: &str) -> Result<String, askama::Error> {
        SummaryDocument {
            summary: self,
            message_link,
        }
        .render()
    }
}
