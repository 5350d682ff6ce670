//! # lumiere-core: Pure Storefront Logic
//!
//! This crate is the **heart** of the Lumière storefront. It contains the
//! catalog, the cart and the checkout as pure state transitions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lumière Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation layer (out of scope)               │   │
//! │  │    Product grid ──► Cart drawer ──► Checkout modal              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lumiere-store                                │   │
//! │  │    CartStore, CheckoutFlow, PaymentGateway, config              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lumiere-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │  Session  │  │   │
//! │  │   │  search   │  │           │  │  reduce   │  │  reduce   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog domain types (Product, Category, SortOrder)
//! - [`catalog`] - The read-only product catalog and its queries
//! - [`money`] - `Money`, integer cents
//! - [`cart`] - Cart lines and the cart reducer
//! - [`checkout`] - Checkout session and the checkout reducer
//! - [`error`] - `CoreError` and `ValidationError`
//! - [`validation`] - Required-field and query validation
//!
//! ## Example Usage
//!
//! ```rust
//! use lumiere_core::cart::{self, CartAction, CartState, LineEntry};
//! use lumiere_core::Money;
//!
//! let ring = LineEntry::new("1", "Eternal Diamond Ring", Money::from_cents(4999), "/ring.jpg");
//!
//! let state = cart::reduce(CartState::new(), CartAction::Add(ring.clone()));
//! let state = cart::reduce(state, CartAction::Add(ring));
//!
//! assert_eq!(state.line_count(), 1);
//! assert_eq!(state.item_count(), 2);
//! assert_eq!(state.subtotal().cents(), 9998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shipping is free on every order.
pub const FREE_SHIPPING: Money = Money::zero();

/// Prefix of synthesized order numbers (`LUM-12345678`).
pub const DEFAULT_ORDER_PREFIX: &str = "LUM";

/// Delivery estimate shown on the order confirmation.
pub const DEFAULT_DELIVERY_ESTIMATE: &str = "5-7 business days";

/// Number of catalog entries shown on the new-arrivals page.
pub const DEFAULT_NEW_ARRIVALS_LIMIT: usize = 6;

/// Duration of the simulated payment round trip.
pub const SIMULATED_PAYMENT_DELAY_MS: u64 = 2000;

/// Longest search query accepted by [`Catalog::search`].
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
