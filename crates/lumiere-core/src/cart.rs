//! # Cart
//!
//! Cart lines and the cart reducer.
//!
//! ## Reducer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  UI Action              CartAction                State Change          │
//! │  ─────────              ──────────                ────────────          │
//! │                                                                         │
//! │  "Add to Cart" ───────► Add(entry) ─────────────► qty + 1 or new line  │
//! │                                                                         │
//! │  Detail view "x3" ────► AddMany { entry, 3 } ───► qty + 3 or new line  │
//! │                                                                         │
//! │  − / + buttons ───────► UpdateQuantity ─────────► qty = n (n ≤ 0 drops)│
//! │                                                                         │
//! │  Trash icon ──────────► Remove ─────────────────► line dropped         │
//! │                                                                         │
//! │  Order placed ────────► Clear ──────────────────► no lines             │
//! │                                                                         │
//! │  reduce(state, action) -> state   (pure, never fails)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `(id, variant)`; adding the same pair again bumps
//!   the quantity
//! - Quantity is always ≥ 1; a line is removed rather than kept at 0
//! - Lines keep the order in which they were first added
//! - Subtotal and item count are computed from the lines on every read

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::FREE_SHIPPING;

// =============================================================================
// Line Entry
// =============================================================================

/// What the storefront hands the cart when a product is added.
///
/// Name, image and price are snapshots: the cart never re-reads the
/// catalog, so a later price change does not touch existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineEntry {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image: String,
    #[serde(default)]
    pub variant: Option<String>,
}

impl LineEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        LineEntry {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            variant: None,
        }
    }

    /// Sets the variant discriminator (ring size, chain length, ...).
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Snapshots a catalog product.
    pub fn from_product(product: &Product) -> Self {
        LineEntry::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.image.clone(),
        )
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Unit price, frozen at add time.
    pub price: Money,
    pub quantity: u32,
    pub variant: Option<String>,
}

impl CartLine {
    fn from_entry(entry: LineEntry, quantity: u32) -> Self {
        CartLine {
            id: entry.id,
            name: entry.name,
            image: entry.image,
            price: entry.price,
            quantity,
            variant: entry.variant,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// True when this line is the `(id, variant)` line. `None` only
    /// matches `None`.
    pub fn matches(&self, id: &str, variant: Option<&str>) -> bool {
        self.id == id && self.variant.as_deref() == variant
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart contents. Totals are derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Finds the `(id, variant)` line.
    pub fn line(&self, id: &str, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(id, variant))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ quantity over all lines (the badge on the cart icon).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Shipping is a flat free-shipping constant.
    pub fn shipping(&self) -> Money {
        FREE_SHIPPING
    }

    /// Subtotal plus shipping. No tax is computed.
    pub fn total(&self) -> Money {
        self.subtotal() + self.shipping()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &str, variant: Option<&str>) -> Option<usize> {
        self.lines.iter().position(|l| l.matches(id, variant))
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit.
    Add(LineEntry),
    /// Add `quantity` units at once; same as `quantity` successive `Add`s.
    AddMany { entry: LineEntry, quantity: u32 },
    /// Drop the line. No-op when absent.
    Remove { id: String, variant: Option<String> },
    /// Set the quantity exactly; `quantity <= 0` removes. No-op when absent.
    UpdateQuantity {
        id: String,
        quantity: i64,
        variant: Option<String>,
    },
    /// Drop every line.
    Clear,
}

impl CartAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::Add(_) => "add",
            CartAction::AddMany { .. } => "add_many",
            CartAction::Remove { .. } => "remove",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::Clear => "clear",
        }
    }
}

/// Applies `action` to `state` and returns the new state.
///
/// ## Example
/// ```rust
/// use lumiere_core::cart::{reduce, CartAction, CartState, LineEntry};
/// use lumiere_core::Money;
///
/// let ring = LineEntry::new("1", "Eternal Diamond Ring", Money::from_cents(4999), "/ring.jpg");
/// let state = reduce(CartState::new(), CartAction::AddMany { entry: ring, quantity: 2 });
///
/// let state = reduce(
///     state,
///     CartAction::UpdateQuantity { id: "1".into(), quantity: 1, variant: None },
/// );
/// assert_eq!(state.subtotal().cents(), 4999);
/// ```
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::Add(entry) => add(&mut state, entry, 1),
        CartAction::AddMany { entry, quantity } => add(&mut state, entry, quantity),
        CartAction::Remove { id, variant } => remove(&mut state, &id, variant.as_deref()),
        CartAction::UpdateQuantity {
            id,
            quantity,
            variant,
        } => {
            if quantity <= 0 {
                remove(&mut state, &id, variant.as_deref());
            } else if let Some(index) = state.position(&id, variant.as_deref()) {
                state.lines[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
        CartAction::Clear => state.lines.clear(),
    }
    state
}

fn add(state: &mut CartState, entry: LineEntry, quantity: u32) {
    if quantity == 0 {
        return;
    }

    match state.position(&entry.id, entry.variant.as_deref()) {
        Some(index) => {
            let line = &mut state.lines[index];
            line.quantity = line.quantity.saturating_add(quantity);
        }
        None => state.lines.push(CartLine::from_entry(entry, quantity)),
    }
}

fn remove(state: &mut CartState, id: &str, variant: Option<&str>) {
    state.lines.retain(|l| !l.matches(id, variant));
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the cart drawer and the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            shipping: cart.shipping(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn ring() -> LineEntry {
        LineEntry::new("1", "Eternal Diamond Ring", Money::from_cents(4999), "/ring.jpg")
    }

    fn chain() -> LineEntry {
        LineEntry::new("6", "Rose Gold Chain", Money::from_cents(899), "/chain.jpg")
    }

    fn apply(state: CartState, actions: Vec<CartAction>) -> CartState {
        actions.into_iter().fold(state, reduce)
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let state = apply(
            CartState::new(),
            vec![
                CartAction::Add(ring()),
                CartAction::Add(ring()),
                CartAction::Add(ring()),
            ],
        );

        assert_eq!(state.line_count(), 1); // Still one line
        assert_eq!(state.line("1", None).map(|l| l.quantity), Some(3));
    }

    #[test]
    fn test_variants_are_separate_lines() {
        let state = apply(
            CartState::new(),
            vec![
                CartAction::Add(ring().with_variant("size 6")),
                CartAction::Add(ring().with_variant("size 7")),
                CartAction::Add(ring()),
                CartAction::Add(ring().with_variant("size 6")),
            ],
        );

        assert_eq!(state.line_count(), 3);
        assert_eq!(state.line("1", Some("size 6")).map(|l| l.quantity), Some(2));
        assert_eq!(state.line("1", Some("size 7")).map(|l| l.quantity), Some(1));
        assert_eq!(state.line("1", None).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let state = apply(
            CartState::new(),
            vec![
                CartAction::Add(chain()),
                CartAction::Add(ring()),
                CartAction::Add(chain()),
            ],
        );

        let ids: Vec<&str> = state.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "1"]);
    }

    #[test]
    fn test_totals_follow_lines() {
        let state = apply(
            CartState::new(),
            vec![
                CartAction::Add(ring()),
                CartAction::Add(ring()),
                CartAction::Add(chain()),
            ],
        );

        assert_eq!(state.subtotal().cents(), 4999 * 2 + 899);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.shipping(), Money::zero());
        assert_eq!(state.total(), state.subtotal());

        let state = reduce(
            state,
            CartAction::UpdateQuantity {
                id: "6".into(),
                quantity: 4,
                variant: None,
            },
        );
        assert_eq!(state.subtotal().cents(), 4999 * 2 + 899 * 4);
        assert_eq!(state.item_count(), 6);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let state = apply(
            CartState::new(),
            vec![
                CartAction::Add(ring()),
                CartAction::Add(ring()),
                CartAction::UpdateQuantity {
                    id: "1".into(),
                    quantity: 1,
                    variant: None,
                },
            ],
        );

        assert_eq!(state.line("1", None).map(|l| l.quantity), Some(1));
        assert_eq!(state.subtotal().cents(), 4999);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let start = apply(CartState::new(), vec![CartAction::Add(ring()), CartAction::Add(chain())]);

        let updated = reduce(
            start.clone(),
            CartAction::UpdateQuantity {
                id: "1".into(),
                quantity: 0,
                variant: None,
            },
        );
        let removed = reduce(
            start.clone(),
            CartAction::Remove {
                id: "1".into(),
                variant: None,
            },
        );
        let negative = reduce(
            start,
            CartAction::UpdateQuantity {
                id: "1".into(),
                quantity: -3,
                variant: None,
            },
        );

        assert_eq!(updated, removed);
        assert_eq!(negative, removed);
        assert!(removed.line("1", None).is_none());
        assert_eq!(removed.line_count(), 1);
    }

    #[test]
    fn test_absent_lines_are_noops() {
        let start = apply(CartState::new(), vec![CartAction::Add(ring().with_variant("size 6"))]);

        let after = apply(
            start.clone(),
            vec![
                CartAction::Remove {
                    id: "42".into(),
                    variant: None,
                },
                // id matches but variant does not
                CartAction::Remove {
                    id: "1".into(),
                    variant: None,
                },
                CartAction::UpdateQuantity {
                    id: "1".into(),
                    quantity: 5,
                    variant: Some("size 9".into()),
                },
            ],
        );

        assert_eq!(after, start);
    }

    #[test]
    fn test_add_many_equals_repeated_add() {
        let many = reduce(
            CartState::new(),
            CartAction::AddMany {
                entry: ring(),
                quantity: 3,
            },
        );
        let repeated = apply(
            CartState::new(),
            vec![
                CartAction::Add(ring()),
                CartAction::Add(ring()),
                CartAction::Add(ring()),
            ],
        );
        assert_eq!(many, repeated);

        let none = reduce(
            CartState::new(),
            CartAction::AddMany {
                entry: ring(),
                quantity: 0,
            },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let state = apply(CartState::new(), vec![CartAction::Add(ring()), CartAction::Add(chain())]);

        let once = reduce(state, CartAction::Clear);
        assert!(once.is_empty());
        let twice = reduce(once, CartAction::Clear);
        assert!(twice.is_empty());
        assert_eq!(twice.item_count(), 0);
        assert!(twice.subtotal().is_zero());
    }

    #[test]
    fn test_price_is_a_snapshot() {
        let mut catalog_product = Catalog::builtin().get("1").cloned().unwrap();
        let state = reduce(CartState::new(), CartAction::Add(LineEntry::from_product(&catalog_product)));

        catalog_product.price = Money::from_major(1);
        let state = reduce(state, CartAction::Add(LineEntry::from_product(&catalog_product)));

        // Same line, original unit price kept
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.line("1", None).map(|l| l.price), Some(Money::from_major(4999)));
    }

    #[test]
    fn test_totals_summary() {
        let state = apply(CartState::new(), vec![CartAction::Add(ring()), CartAction::Add(ring())]);
        let totals = CartTotals::from(&state);

        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal.cents(), 9998);
        assert_eq!(totals.total.cents(), 9998);
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = reduce(CartState::new(), CartAction::Add(ring().with_variant("size 6")));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert_eq!(json["lines"][0]["variant"], "size 6");
        assert_eq!(json["lines"][0]["price"], 4999);
    }
}
