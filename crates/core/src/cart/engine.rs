//! The cart engine: sole owner of cart state.
//!
//! Every mutation is also a storage write. Methods take `&mut self`, update
//! the in-memory cart, then immediately save the encoded cart into the
//! store's slot before returning. There is no buffering and no flush step.
//!
//! Ids that are not in the catalog (for `add`) or not in the cart (for the
//! other mutations) are ignored without error and without a write.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::{Cart, CartEntry, codec};
use crate::catalog::Catalog;
use crate::store::{CartStore, StoreError};
use crate::types::{Price, ProductId};

/// Storage slot holding the encoded cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// State changed and was written to storage.
    Applied,
    /// Unknown id or missing entry; nothing changed, nothing written.
    Ignored,
}

impl Change {
    const fn from_applied(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::Ignored }
    }

    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owns the [`Cart`] and keeps it in sync with a [`CartStore`].
#[derive(Debug)]
pub struct CartEngine<S> {
    catalog: Arc<Catalog>,
    cart: Cart,
    store: S,
    key: String,
}

impl<S: CartStore> CartEngine<S> {
    /// Restore the cart from the default slot of `store`.
    ///
    /// Never fails: unreadable or malformed storage starts an empty cart.
    pub fn load(catalog: Arc<Catalog>, store: S) -> Self {
        Self::load_with_key(catalog, store, CART_STORAGE_KEY)
    }

    /// Restore the cart from a custom slot.
    pub fn load_with_key(catalog: Arc<Catalog>, store: S, key: &str) -> Self {
        let cart = restore(&catalog, &store, key);
        debug!(
            key,
            entries = cart.len(),
            items = cart.item_count(),
            "Cart restored"
        );
        Self {
            catalog,
            cart,
            store,
            key: key.to_owned(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a catalog product.
    ///
    /// Creates the entry on first add, snapshotting the catalog name and
    /// price.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails. The in-memory change is
    /// kept.
    #[instrument(skip(self))]
    pub fn add(&mut self, id: ProductId) -> Result<Change, StoreError> {
        let Some(product) = self.catalog.find(id) else {
            debug!("Ignoring add for product not in catalog");
            return Ok(Change::Ignored);
        };
        self.cart.add_one(product);
        self.commit(Change::Applied)
    }

    /// Add one unit to an existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    #[instrument(skip(self))]
    pub fn increment(&mut self, id: ProductId) -> Result<Change, StoreError> {
        let change = Change::from_applied(self.cart.increment(id));
        self.commit(change)
    }

    /// Take one unit off an existing entry, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    #[instrument(skip(self))]
    pub fn decrement(&mut self, id: ProductId) -> Result<Change, StoreError> {
        let change = Change::from_applied(self.cart.decrement(id));
        self.commit(change)
    }

    /// Drop an entry regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Result<Change, StoreError> {
        let change = Change::from_applied(self.cart.remove(id));
        self.commit(change)
    }

    /// Empty the cart.
    ///
    /// Always writes, even when the cart is already empty, so a corrupt slot
    /// is overwritten with a valid empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<Change, StoreError> {
        self.cart.clear();
        self.commit(Change::Applied)
    }

    fn commit(&mut self, change: Change) -> Result<Change, StoreError> {
        if change.is_applied() {
            let encoded = codec::encode(&self.cart);
            self.store.save(&self.key, &encoded)?;
            debug!(
                entries = self.cart.len(),
                items = self.cart.item_count(),
                "Cart saved"
            );
        }
        Ok(change)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Owned snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<CartEntry> {
        self.cart.entries().to_vec()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of `quantity * price` over all entries.
    #[must_use]
    pub fn order_total(&self) -> Price {
        self.cart.order_total()
    }

    /// Quantity held for `id`, 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.cart.get(id).map_or(0, |entry| entry.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, dropping the in-memory cart.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Read and validate the stored cart, degrading to empty on any problem.
fn restore<S: CartStore>(catalog: &Catalog, store: &S, key: &str) -> Cart {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    let mut cart = match codec::try_decode(&raw) {
        Ok(cart) => cart,
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable stored cart");
            return Cart::new();
        }
    };

    let pruned = cart.retain(|entry| catalog.contains(entry.id));
    if pruned > 0 {
        warn!(key, pruned, "Dropped stored cart entries missing from catalog");
    }
    cart
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Product;

    const MOCHILA: ProductId = ProductId::new(1);
    const SOMBRERO: ProductId = ProductId::new(2);
    const HAMACA: ProductId = ProductId::new(3);
    const UNKNOWN: ProductId = ProductId::new(404);

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                Product::new(MOCHILA, "Mochila", Price::new(12_000), "Tejida"),
                Product::new(SOMBRERO, "Sombrero", Price::new(6_000), "Caña flecha"),
                Product::new(HAMACA, "Hamaca", Price::new(45_000), "Algodón"),
            ])
            .unwrap(),
        )
    }

    fn engine() -> CartEngine<MemoryStore> {
        CartEngine::load(catalog(), MemoryStore::new())
    }

    /// Store that refuses every write.
    #[derive(Default)]
    struct ReadOnlyStore;

    impl CartStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".to_string()))
        }
    }

    /// Store whose reads always fail.
    struct BrokenStore;

    impl CartStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_add_twice_yields_quantity_two() {
        let mut engine = engine();
        assert_eq!(engine.add(MOCHILA).unwrap(), Change::Applied);
        assert_eq!(engine.add(MOCHILA).unwrap(), Change::Applied);

        let entries = engine.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().unwrap().quantity, 2);
        assert_eq!(engine.item_count(), 2);
    }

    #[test]
    fn test_add_unknown_product_is_ignored_without_write() {
        let mut engine = engine();
        assert_eq!(engine.add(UNKNOWN).unwrap(), Change::Ignored);
        assert!(engine.is_empty());
        assert_eq!(engine.store().get(CART_STORAGE_KEY), None);
    }

    #[test]
    fn test_mutations_on_missing_entries_are_ignored() {
        let mut engine = engine();
        engine.add(MOCHILA).unwrap();

        assert_eq!(engine.increment(SOMBRERO).unwrap(), Change::Ignored);
        assert_eq!(engine.decrement(SOMBRERO).unwrap(), Change::Ignored);
        assert_eq!(engine.remove(SOMBRERO).unwrap(), Change::Ignored);
        assert_eq!(engine.increment(UNKNOWN).unwrap(), Change::Ignored);
        assert_eq!(engine.item_count(), 1);
    }

    #[test]
    fn test_decrement_from_one_removes_entry() {
        let mut engine = engine();
        engine.add(SOMBRERO).unwrap();
        assert_eq!(engine.decrement(SOMBRERO).unwrap(), Change::Applied);

        assert!(engine.entries().iter().all(|e| e.id != SOMBRERO));
        assert_eq!(engine.quantity(SOMBRERO), 0);
        assert_eq!(engine.store().get(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_increment_and_remove() {
        let mut engine = engine();
        engine.add(HAMACA).unwrap();
        engine.increment(HAMACA).unwrap();
        engine.increment(HAMACA).unwrap();
        assert_eq!(engine.quantity(HAMACA), 3);

        assert_eq!(engine.remove(HAMACA).unwrap(), Change::Applied);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_order_total() {
        let mut engine = engine();
        engine.add(MOCHILA).unwrap();
        engine.add(MOCHILA).unwrap();
        engine.add(SOMBRERO).unwrap();

        assert_eq!(engine.order_total(), Price::new(30_000));
        assert_eq!(engine.order_total().to_string(), "$30.000");
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut engine = engine();
        engine.add(MOCHILA).unwrap();
        let stored = engine.store().get(CART_STORAGE_KEY).unwrap();
        assert_eq!(codec::decode(stored), *engine.cart());

        engine.add(SOMBRERO).unwrap();
        engine.increment(MOCHILA).unwrap();
        let stored = engine.store().get(CART_STORAGE_KEY).unwrap();
        assert_eq!(codec::decode(stored), *engine.cart());

        engine.clear().unwrap();
        assert_eq!(engine.store().get(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_state_survives_reload() {
        let mut engine = engine();
        engine.add(HAMACA).unwrap();
        engine.add(MOCHILA).unwrap();
        engine.add(MOCHILA).unwrap();
        let before = engine.entries();

        let reloaded = CartEngine::load(catalog(), engine.into_store());
        assert_eq!(reloaded.entries(), before);
    }

    #[test]
    fn test_snapshot_price_is_kept_after_catalog_change() {
        let mut engine = engine();
        engine.add(MOCHILA).unwrap();

        let repriced = Arc::new(
            Catalog::new(vec![Product::new(
                MOCHILA,
                "Mochila",
                Price::new(99_000),
                "",
            )])
            .unwrap(),
        );
        let mut reloaded = CartEngine::load(repriced, engine.into_store());
        reloaded.add(MOCHILA).unwrap();

        let entry = reloaded.entries().into_iter().next().unwrap();
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.price, Price::new(12_000));
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = MemoryStore::with_slot(CART_STORAGE_KEY, "{{ not json");
        let mut engine = CartEngine::load(catalog(), store);
        assert!(engine.is_empty());

        engine.add(SOMBRERO).unwrap();
        assert_eq!(engine.quantity(SOMBRERO), 1);
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let engine = CartEngine::load(catalog(), BrokenStore);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_entries_missing_from_catalog_are_pruned_on_load() {
        let raw = r#"[{"id":404,"name":"Gone","price":1,"quantity":1},{"id":2,"name":"Sombrero","price":6000,"quantity":2}]"#;
        let engine = CartEngine::load(catalog(), MemoryStore::with_slot(CART_STORAGE_KEY, raw));

        let ids: Vec<ProductId> = engine.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![SOMBRERO]);
        assert_eq!(engine.item_count(), 2);
    }

    #[test]
    fn test_write_failure_is_reported_and_state_kept() {
        let mut engine = CartEngine::load(catalog(), ReadOnlyStore);
        assert!(matches!(
            engine.add(MOCHILA),
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(engine.quantity(MOCHILA), 1);

        // Ignored mutations never touch storage, so they cannot fail.
        assert_eq!(engine.increment(UNKNOWN).unwrap(), Change::Ignored);
    }

    #[test]
    fn test_custom_slot_key() {
        let mut engine = CartEngine::load_with_key(catalog(), MemoryStore::new(), "other");
        engine.add(MOCHILA).unwrap();
        assert!(engine.store().get("other").is_some());
        assert_eq!(engine.store().get(CART_STORAGE_KEY), None);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Add(u32),
        Increment(u32),
        Decrement(u32),
        Remove(u32),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        // Ids 1..=3 are in the catalog, 4 is not.
        prop_oneof![
            4 => (1u32..=4).prop_map(Op::Add),
            2 => (1u32..=4).prop_map(Op::Increment),
            3 => (1u32..=4).prop_map(Op::Decrement),
            1 => (1u32..=4).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_sequence(ops in proptest::collection::vec(op(), 0..60)) {
            let mut engine = engine();
            for op in ops {
                let _ = match op {
                    Op::Add(id) => engine.add(ProductId::new(id)).unwrap(),
                    Op::Increment(id) => engine.increment(ProductId::new(id)).unwrap(),
                    Op::Decrement(id) => engine.decrement(ProductId::new(id)).unwrap(),
                    Op::Remove(id) => engine.remove(ProductId::new(id)).unwrap(),
                    Op::Clear => engine.clear().unwrap(),
                };

                let entries = engine.entries();
                let sum: u64 = entries.iter().map(|e| u64::from(e.quantity)).sum();
                prop_assert_eq!(engine.item_count(), sum);
                prop_assert!(entries.iter().all(|e| e.quantity >= 1));
                prop_assert!(entries.iter().all(|e| engine.catalog().contains(e.id)));

                let mut ids: Vec<ProductId> = entries.iter().map(|e| e.id).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), entries.len());

                let total: u64 = entries.iter().map(|e| e.price.amount() * u64::from(e.quantity)).sum();
                prop_assert_eq!(engine.order_total(), Price::new(total));

                if let Some(stored) = engine.store().get(CART_STORAGE_KEY) {
                    prop_assert_eq!(&codec::decode(stored), engine.cart());
                }
            }
        }
    }
}
