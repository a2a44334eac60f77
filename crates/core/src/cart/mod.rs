//! Cart state, its persisted form, and the engine that owns it.
//!
//! [`Cart`] is plain state: an insertion-ordered set of [`CartEntry`] keyed by
//! product id. It can only be changed from inside this crate, and the only
//! public way to do that is through [`CartEngine`], which validates ids
//! against the catalog and writes storage after every change.

pub mod codec;
pub mod engine;
pub mod entry;

pub use codec::{DecodeError, decode, encode, try_decode};
pub use engine::{CART_STORAGE_KEY, CartEngine, Change};
pub use entry::CartEntry;

use crate::types::{Price, Product, ProductId};

/// The current selection of products and quantities.
///
/// Invariants:
/// - at most one entry per product id
/// - every stored entry has `quantity >= 1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .fold(0, u64::saturating_add)
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn order_total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_subtotal).sum()
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Add one unit of `product`, creating its entry from a snapshot if needed.
    pub(crate) fn add_one(&mut self, product: &Product) {
        if self.get(product.id).is_none() {
            self.entries.push(CartEntry::snapshot(product));
        }
        // The entry exists now, either pre-existing or just pushed.
        if let Some(entry) = self.get_mut(product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
        }
    }

    /// Returns `false` if there is no entry for `id`.
    pub(crate) fn increment(&mut self, id: ProductId) -> bool {
        self.get_mut(id).is_some_and(|entry| {
            entry.quantity = entry.quantity.saturating_add(1);
            true
        })
    }

    /// Decrease by one, dropping the entry when it reaches zero.
    ///
    /// Returns `false` if there is no entry for `id`.
    pub(crate) fn decrement(&mut self, id: ProductId) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };
        entry.quantity = entry.quantity.saturating_sub(1);
        if entry.quantity == 0 {
            self.entries.retain(|entry| entry.id != id);
        }
        true
    }

    /// Returns `false` if there was no entry for `id`.
    pub(crate) fn remove(&mut self, id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry for which `keep` returns `false`, returning how many
    /// were dropped.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&CartEntry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| keep(entry));
        before - self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub(crate) const fn from_entries_unchecked(entries: Vec<CartEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
