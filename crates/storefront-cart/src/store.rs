use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use storefront_core::Product;
use tracing::debug;
use uuid::Uuid;

use crate::entry::CartEntry;

/// Mutable cart state for one shopping session.
///
/// Cloning the store produces another handle to the same session; the entry
/// list lives behind a mutex so concurrent mutations serialize and the
/// one-entry-per-product-id invariant holds under racing `add` calls. All
/// operations are synchronous and hold the lock only for the duration of one
/// vector scan, never across an await point.
///
/// State is process-local and dropped with the last handle. Nothing is
/// persisted anywhere.
#[derive(Debug, Clone)]
pub struct CartStore {
    session_id: Uuid,
    entries: Arc<Mutex<Vec<CartEntry>>>,
}

impl CartStore {
    /// Creates an empty cart with a fresh session id.
    #[must_use]
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, "cart session created");
        Self {
            session_id,
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Identifier correlating log lines for this session.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Adds one unit of `product` to the cart.
    ///
    /// If the product id is already present its quantity goes up by one and
    /// the stored product data is left as it was; otherwise a new entry with
    /// quantity 1 is appended. The lookup and insert happen under one lock
    /// acquisition, so two racing adds of a new product cannot both append.
    pub fn add(&self, product: Product) {
        let mut entries = self.lock_entries();
        if let Some(entry) = entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            debug!(
                session_id = %self.session_id,
                product_id = product.id,
                quantity = entry.quantity,
                "incremented cart entry"
            );
        } else {
            debug!(
                session_id = %self.session_id,
                product_id = product.id,
                "added cart entry"
            );
            entries.push(CartEntry {
                product,
                quantity: 1,
            });
        }
    }

    /// Removes the entire entry for `product_id`, regardless of quantity.
    ///
    /// Removing an id that is not in the cart is a no-op.
    pub fn remove(&self, product_id: u32) {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|e| e.product.id != product_id);
        if entries.len() < before {
            debug!(
                session_id = %self.session_id,
                product_id,
                "removed cart entry"
            );
        }
    }

    /// Empties the cart.
    pub fn clear(&self) {
        let mut entries = self.lock_entries();
        let cleared = entries.len();
        entries.clear();
        debug!(
            session_id = %self.session_id,
            cleared,
            "cleared cart"
        );
    }

    /// Sum of `price * quantity` over all entries, in exact decimal
    /// arithmetic. An empty cart totals zero.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock_entries().iter().map(CartEntry::line_total).sum()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lock_entries()
            .iter()
            .map(|e| u64::from(e.quantity))
            .sum()
    }

    /// Snapshot of the current entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<CartEntry> {
        self.lock_entries().clone()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// No mutation can leave the vector half-updated, so a cart behind a
    /// poisoned lock is still consistent and safe to keep using.
    fn lock_entries(&self) -> MutexGuard<'_, Vec<CartEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(id: u32, price: Decimal) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price,
            description: String::new(),
            category: "electronics".to_owned(),
            image: "https://images.example/p.jpg".to_owned(),
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn adding_the_same_product_increments_quantity() {
        let store = CartStore::new();
        let backpack = make_product(1, Decimal::new(109_95, 2));

        store.add(backpack.clone());
        store.add(backpack);

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn multi_product_session_tracks_count_and_total() {
        let store = CartStore::new();
        let backpack = make_product(1, Decimal::new(109_95, 2));
        let shirt = make_product(2, Decimal::new(22_30, 2));

        store.add(backpack.clone());
        store.add(backpack);
        store.add(shirt);

        assert_eq!(store.len(), 2);
        assert_eq!(store.count(), 3);
        assert_eq!(store.total(), Decimal::new(242_20, 2));

        store.remove(1);
        assert_eq!(store.count(), 1);
        assert_eq!(store.total(), Decimal::new(22_30, 2));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn repeated_cheap_items_total_exactly() {
        let store = CartStore::new();
        let ring = make_product(7, Decimal::new(9_99, 2));

        store.add(ring.clone());
        store.add(ring.clone());
        store.add(ring);

        assert_eq!(store.total(), Decimal::new(29_97, 2));
        assert_eq!(store.total().to_string(), "29.97");
    }

    #[test]
    fn remove_drops_the_whole_entry_regardless_of_quantity() {
        let store = CartStore::new();
        let drive = make_product(9, Decimal::new(64_00, 2));

        store.add(drive.clone());
        store.add(drive.clone());
        store.add(drive.clone());
        store.remove(9);

        assert!(store.is_empty());

        // Re-adding starts over at quantity 1.
        store.add(drive);
        assert_eq!(store.entries()[0].quantity, 1);
    }

    #[test]
    fn removing_an_absent_id_is_a_no_op() {
        let store = CartStore::new();
        store.add(make_product(1, Decimal::new(109_95, 2)));

        store.remove(42);

        assert_eq!(store.len(), 1);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn clones_share_the_same_session() {
        let store = CartStore::new();
        let handle = store.clone();

        handle.add(make_product(1, Decimal::new(109_95, 2)));

        assert_eq!(store.session_id(), handle.session_id());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn separate_sessions_do_not_share_state() {
        let first = CartStore::new();
        let second = CartStore::new();

        first.add(make_product(1, Decimal::new(109_95, 2)));

        assert_ne!(first.session_id(), second.session_id());
        assert!(second.is_empty());
    }

    #[test]
    fn concurrent_adds_never_duplicate_an_entry() {
        let store = CartStore::new();
        let product = make_product(1, Decimal::new(9_99, 2));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let product = product.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.add(product.clone());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("add thread panicked");
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.count(), 800);
        assert_eq!(store.total(), Decimal::new(9_99, 2) * Decimal::from(800));
    }

    #[test]
    fn interleaved_adds_and_removes_keep_entries_unique() {
        let store = CartStore::new();
        let product = make_product(3, Decimal::new(55_99, 2));

        let adder = {
            let store = store.clone();
            let product = product.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    store.add(product.clone());
                }
            })
        };
        let remover = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    store.remove(3);
                }
            })
        };
        adder.join().expect("add thread panicked");
        remover.join().expect("remove thread panicked");

        let matching = store
            .entries()
            .iter()
            .filter(|e| e.product.id == 3)
            .count();
        assert!(matching <= 1, "expected at most one entry, found {matching}");
    }
}
