//! # lumiere-store: Session State for the Lumière Storefront
//!
//! This crate wraps the pure reducers of `lumiere-core` in the handles a
//! storefront session actually holds: a shared cart, a checkout flow with a
//! real asynchronous payment contract, and the storefront configuration.
//!
//! ## Session Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Storefront Session                           │
//! │                                                                         │
//! │   Product pages        Cart drawer            Checkout modal            │
//! │        │                    │                       │                   │
//! │        ▼                    ▼                       ▼                   │
//! │  ┌─────────────────────────────────┐     ┌──────────────────────────┐  │
//! │  │           CartStore             │◄────│      CheckoutFlow        │  │
//! │  │  Arc<Mutex<CartState>>          │clear│  Arc<Mutex<Session>>     │  │
//! │  │  cart::reduce under the lock    │     │  checkout::reduce        │  │
//! │  └─────────────────────────────────┘     └────────────┬─────────────┘  │
//! │                                                       │ charge()       │
//! │                                                       ▼                 │
//! │                                          ┌──────────────────────────┐  │
//! │                                          │  dyn PaymentGateway      │  │
//! │                                          │  (SimulatedGateway: 2s)  │  │
//! │                                          └──────────────────────────┘  │
//! │                                                                         │
//! │  Handles are created per session and passed explicitly.               │
//! │  There is no global cart.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`cart`] - `CartStore`, the shared cart handle
//! - [`checkout`] - `CheckoutFlow` and the payment submit
//! - [`payment`] - `PaymentGateway` trait and the simulated gateway
//! - [`config`] - Storefront configuration (TOML + env)
//! - [`error`] - Store error types and the presentation-layer `ApiError`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lumiere_core::Catalog;
//! use lumiere_store::{CartStore, CheckoutFlow, SimulatedGateway, StorefrontConfig};
//!
//! # async fn demo() -> Result<(), lumiere_store::StoreError> {
//! let config = StorefrontConfig::load_or_default(None);
//! let catalog = Catalog::builtin();
//!
//! let cart = CartStore::new();
//! cart.add_product(&catalog, "1", 2)?;
//!
//! let gateway = Arc::new(SimulatedGateway::new(config.checkout.payment_delay()));
//! let checkout = CheckoutFlow::new(cart.clone(), gateway, config.checkout.clone());
//! checkout.open();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod payment;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartStore, CartView};
pub use checkout::{CheckoutFlow, PaymentOutcome};
pub use config::{CatalogConfig, CheckoutConfig, StorefrontConfig};
pub use error::{ApiError, ErrorCode, PaymentError, StoreError, StoreResult};
pub use payment::{PaymentGateway, PaymentReceipt, PaymentRequest, SimulatedGateway};
