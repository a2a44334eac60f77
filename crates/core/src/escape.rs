//! Markup escaping for user- and catalog-supplied text.

use std::borrow::Cow;

/// Replace `& < > " '` with their entity forms.
///
/// Every other character is passed through untouched. Borrows when there is
/// nothing to escape.
///
/// ```
/// use tiendita_core::escape_text;
///
/// assert_eq!(escape_text("<b>&'\""), "&lt;b&gt;&amp;&#39;&quot;");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
#[must_use]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
