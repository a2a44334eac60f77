//! Durable string form of a [`Cart`].
//!
//! The encoded form is a JSON array of entries in insertion order:
//!
//! ```json
//! [{"id":1,"name":"Mochila","price":12000,"quantity":2}]
//! ```
//!
//! Decoding is fail-soft: [`decode`] never errors and falls back to an empty
//! cart. [`try_decode`] exposes the reason for callers that want to log it.

use std::collections::HashSet;

use super::{Cart, CartEntry};
use crate::types::ProductId;

/// Why a stored cart string could not be decoded.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// Not JSON, or not the expected shape.
    #[error("malformed cart data: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The same product appears twice.
    #[error("duplicate cart entry for product {0}")]
    DuplicateId(ProductId),
    /// An entry has quantity zero.
    #[error("cart entry for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// Serialize `cart` deterministically.
#[must_use]
pub fn encode(cart: &Cart) -> String {
    // Plain structs with string and integer fields always serialize.
    serde_json::to_string(cart.entries()).unwrap_or_else(|_| String::from("[]"))
}

/// Parse a stored cart, checking the cart invariants.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of entries, or if it breaks
/// the one-entry-per-id or positive-quantity invariants.
pub fn try_decode(raw: &str) -> Result<Cart, DecodeError> {
    let entries: Vec<CartEntry> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if entry.quantity == 0 {
            return Err(DecodeError::ZeroQuantity(entry.id));
        }
        if !seen.insert(entry.id) {
            return Err(DecodeError::DuplicateId(entry.id));
        }
    }

    Ok(Cart::from_entries_unchecked(entries))
}

/// Parse a stored cart, returning an empty cart on any failure.
#[must_use]
pub fn decode(raw: &str) -> Cart {
    try_decode(raw).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::{Price, Product};

    fn cart_from(lines: &[(u32, &str, u64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, name, price, quantity) in lines {
            let product = Product::new(ProductId::new(id), name, Price::new(price), "");
            for _ in 0..quantity {
                cart.add_one(&product);
            }
        }
        cart
    }

    #[test]
    fn test_empty_cart_round_trips() {
        let cart = Cart::new();
        assert_eq!(encode(&cart), "[]");
        assert_eq!(decode(&encode(&cart)), cart);
    }

    #[test]
    fn test_encoding_is_stable() {
        let cart = cart_from(&[(1, "Mochila", 12_000, 2), (2, "Sombrero", 6_000, 1)]);
        assert_eq!(
            encode(&cart),
            r#"[{"id":1,"name":"Mochila","price":12000,"quantity":2},{"id":2,"name":"Sombrero","price":6000,"quantity":1}]"#
        );
        assert_eq!(encode(&cart), encode(&cart.clone()));
    }

    #[test]
    fn test_names_with_markup_and_quotes_round_trip() {
        let cart = cart_from(&[(7, r#"Taza "grande" <b>&'"#, 5_000, 3)]);
        assert_eq!(decode(&encode(&cart)), cart);
    }

    #[test]
    fn test_garbage_decodes_to_empty() {
        for raw in [
            "",
            "not json",
            "{}",
            "null",
            "[1,2,3]",
            r#"{"1":{"id":1}}"#,
            r#"[{"id":1,"name":"A","price":-5,"quantity":1}]"#,
            r#"[{"id":1,"name":"A","price":5,"quantity":1.5}]"#,
            r#"[{"id":1,"name":"A","price":5}]"#,
        ] {
            assert!(decode(raw).is_empty(), "expected empty cart for {raw:?}");
        }
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let raw = r#"[{"id":1,"name":"A","price":5,"quantity":0}]"#;
        assert!(matches!(
            try_decode(raw),
            Err(DecodeError::ZeroQuantity(id)) if id == ProductId::new(1)
        ));
        assert!(decode(raw).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let raw = r#"[{"id":1,"name":"A","price":5,"quantity":1},{"id":1,"name":"A","price":5,"quantity":2}]"#;
        assert!(matches!(try_decode(raw), Err(DecodeError::DuplicateId(_))));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            lines in proptest::collection::vec((0u32..50, "[a-zA-Z <>&'\"]{1,12}", 0u64..1_000_000, 1u32..6), 0..10)
        ) {
            let lines: Vec<(u32, &str, u64, u32)> = lines
                .iter()
                .map(|(id, name, price, qty)| (*id, name.as_str(), *price, *qty))
                .collect();
            let cart = cart_from(&lines);
            prop_assert_eq!(decode(&encode(&cart)), cart);
        }

        #[test]
        fn prop_arbitrary_text_never_panics(raw in ".*") {
            let _ = decode(&raw);
        }
    }
}
