//! Custom Askama template filters.
//!
//! Templates are declared with `escape = "none"`, so every text value is run
//! through [`escape_text`] explicitly.

use std::fmt::Display;

/// Escapes `& < > " '` for safe embedding in markup.
///
/// Usage in templates: `{{ product.name|escape_text }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn escape_text(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(tiendita_core::escape_text(&value.to_string()).into_owned())
}
