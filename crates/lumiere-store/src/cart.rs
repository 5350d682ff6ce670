//! # Cart Store
//!
//! The per-session cart handle shared by the storefront pages and the
//! checkout flow.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Product pages, the cart drawer and checkout all hold a handle
//! 2. Only one caller may apply an action at a time
//! 3. Handles are cloned into async tasks
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  Product card ──► add_item(entry) ──────┐                               │
//! │                                         │                               │
//! │  Product modal ─► add_product(id, n) ───┤                               │
//! │                                         ▼                               │
//! │  Cart drawer ───► update_quantity ──► lock ──► cart::reduce ──► unlock  │
//! │                   remove_item               (pure, lumiere-core)        │
//! │                                         ▲                               │
//! │  CheckoutFlow ──► clear_cart ───────────┘                               │
//! │                                                                         │
//! │  Reads (snapshot, subtotal, totals) recompute from the lines.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lumiere_core::cart::{self, CartAction, CartLine, CartState, CartTotals, LineEntry};
use lumiere_core::{Catalog, CoreError, CoreResult, Money};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

/// Cart contents plus the drawer visibility flag.
#[derive(Debug, Default)]
struct CartInner {
    state: CartState,
    is_open: bool,
}

/// Cloneable handle to one session's cart.
///
/// ## Why Not RwLock?
/// Every cart operation is short and most of them write.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<Mutex<CartInner>>,
}

/// Cart payload for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub is_open: bool,
}

impl CartStore {
    /// Creates an empty, closed cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, CartInner> {
        // Recover a poisoned lock; every stored state is a full reducer output
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies an action and returns the resulting state.
    fn apply(&self, action: CartAction) -> CartState {
        let mut inner = self.lock();
        let name = action.name();
        inner.state = cart::reduce(std::mem::take(&mut inner.state), action);
        debug!(
            action = name,
            lines = inner.state.line_count(),
            items = inner.state.item_count(),
            "Cart updated"
        );
        inner.state.clone()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit and opens the cart drawer.
    pub fn add_item(&self, entry: LineEntry) -> CartState {
        debug!(id = %entry.id, variant = ?entry.variant, "Adding to cart");
        let mut inner = self.lock();
        inner.state = cart::reduce(std::mem::take(&mut inner.state), CartAction::Add(entry));
        inner.is_open = true;
        inner.state.clone()
    }

    /// Adds `quantity` units of a catalog product and opens the cart drawer.
    pub fn add_product(&self, catalog: &Catalog, id: &str, quantity: u32) -> CoreResult<CartState> {
        let product = catalog
            .get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        debug!(id, quantity, "Adding product to cart");

        let mut inner = self.lock();
        inner.state = cart::reduce(
            std::mem::take(&mut inner.state),
            CartAction::AddMany {
                entry: LineEntry::from_product(product),
                quantity,
            },
        );
        inner.is_open = true;
        Ok(inner.state.clone())
    }

    /// Drops the `(id, variant)` line.
    ///
    /// Returns whether a line matched. An unknown line leaves the cart as is.
    pub fn remove_item(&self, id: &str, variant: Option<&str>) -> bool {
        let mut inner = self.lock();
        let found = inner.state.line(id, variant).is_some();
        if found {
            inner.state = cart::reduce(
                std::mem::take(&mut inner.state),
                CartAction::Remove {
                    id: id.to_string(),
                    variant: variant.map(str::to_string),
                },
            );
        }
        debug!(id, ?variant, found, "Remove from cart");
        found
    }

    /// Sets the quantity of the `(id, variant)` line; `quantity <= 0` removes.
    ///
    /// Returns whether a line matched.
    pub fn update_quantity(&self, id: &str, quantity: i64, variant: Option<&str>) -> bool {
        let mut inner = self.lock();
        let found = inner.state.line(id, variant).is_some();
        if found {
            inner.state = cart::reduce(
                std::mem::take(&mut inner.state),
                CartAction::UpdateQuantity {
                    id: id.to_string(),
                    quantity,
                    variant: variant.map(str::to_string),
                },
            );
        }
        debug!(id, quantity, ?variant, found, "Update cart quantity");
        found
    }

    /// Empties the cart.
    pub fn clear_cart(&self) {
        self.apply(CartAction::Clear);
    }

    /// Shows or hides the cart drawer.
    pub fn set_open(&self, open: bool) {
        self.lock().is_open = open;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Copy of the current contents.
    pub fn snapshot(&self) -> CartState {
        self.lock().state.clone()
    }

    pub fn subtotal(&self) -> Money {
        self.lock().state.subtotal()
    }

    pub fn item_count(&self) -> u64 {
        self.lock().state.item_count()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.lock().state)
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    /// Everything the cart drawer renders.
    pub fn view(&self) -> CartView {
        let inner = self.lock();
        CartView {
            lines: inner.state.lines().to_vec(),
            totals: CartTotals::from(&inner.state),
            is_open: inner.is_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> LineEntry {
        LineEntry::new("1", "Eternal Diamond Ring", Money::from_cents(4999), "/ring.jpg")
    }

    #[test]
    fn test_add_item_opens_cart() {
        let store = CartStore::new();
        assert!(!store.is_open());

        store.add_item(ring());
        assert!(store.is_open());
        assert_eq!(store.item_count(), 1);

        store.set_open(false);
        assert!(!store.is_open());
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_add_product_from_catalog() {
        let store = CartStore::new();
        let catalog = Catalog::builtin();

        let state = store.add_product(&catalog, "6", 3).unwrap();
        assert_eq!(state.line("6", None).map(|l| l.quantity), Some(3));
        assert_eq!(store.subtotal(), Money::from_major(899 * 3));
        assert!(store.is_open());

        let err = store.add_product(&catalog, "99", 1).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound("99".into()));
    }

    #[test]
    fn test_absent_line_reports_false() {
        let store = CartStore::new();
        store.add_item(ring());

        assert!(!store.remove_item("2", None));
        assert!(!store.update_quantity("1", 4, Some("size 6")));
        assert_eq!(store.item_count(), 1);

        assert!(store.update_quantity("1", 4, None));
        assert_eq!(store.item_count(), 4);
        assert!(store.remove_item("1", None));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_clones_share_the_cart() {
        let store = CartStore::new();
        let drawer = store.clone();

        store.add_item(ring());
        drawer.add_item(ring());

        assert_eq!(store.snapshot().line_count(), 1);
        assert_eq!(store.totals().subtotal.cents(), 9998);

        drawer.clear_cart();
        drawer.clear_cart();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_adds_keep_one_line() {
        let store = CartStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.add_item(ring());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = store.snapshot();
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.item_count(), 200);
    }

    #[test]
    fn test_view_payload() {
        let store = CartStore::new();
        store.add_item(ring());

        let json = serde_json::to_value(store.view()).unwrap();
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["totals"]["itemCount"], 1);
        assert_eq!(json["lines"][0]["id"], "1");
    }
}
