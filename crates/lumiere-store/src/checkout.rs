//! # Checkout Flow
//!
//! Drives one checkout session: the pure checkout reducer for the steps,
//! the payment gateway for the money, and the cart store for the order.
//!
//! ## Payment Submit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      submit_payment(info)                               │
//! │                                                                         │
//! │  1. lock session ── BeginPayment ──┬── PaymentInProgress ──► Ignored    │
//! │     snapshot cart total            │                                    │
//! │     unlock                         ▼                                    │
//! │                                 is_processing = true                    │
//! │                                                                         │
//! │  2. gateway.charge() under timeout                                      │
//! │        │                                                                │
//! │        ├── Timeout / Unavailable ──► backoff ──► retry (max attempts)   │
//! │        ├── Declined ───────────────► PaymentFailed ──► Err(Payment)     │
//! │        └── Ok(receipt)                                                  │
//! │                │                                                        │
//! │  3. lock session ── PaymentSucceeded ── clear cart ──► Confirmed        │
//! │                                                                         │
//! │  Steps 2 and 3 run on a spawned task. Dropping the caller's future     │
//! │  does not cancel the payment; the session still settles.               │
//! │  No lock is held across the gateway call.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use chrono::Utc;
use lumiere_core::checkout::{
    self, CheckoutAction, CheckoutSession, CheckoutStep, OrderConfirmation, PaymentInfo,
    ShippingInfo,
};
use lumiere_core::CoreError;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cart::CartStore;
use crate::config::CheckoutConfig;
use crate::error::{PaymentError, StoreResult};
use crate::payment::{PaymentGateway, PaymentReceipt, PaymentRequest};

/// Result of a payment submit that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The order went through.
    Confirmed(OrderConfirmation),
    /// Another submit for this session is still in flight; nothing was done.
    Ignored,
}

/// One checkout session bound to a cart and a gateway.
///
/// Cloning gives another handle to the same session.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    session: Arc<Mutex<CheckoutSession>>,
    cart: CartStore,
    gateway: Arc<dyn PaymentGateway>,
    config: CheckoutConfig,
}

impl CheckoutFlow {
    pub fn new(cart: CartStore, gateway: Arc<dyn PaymentGateway>, config: CheckoutConfig) -> Self {
        CheckoutFlow {
            session: Arc::new(Mutex::new(CheckoutSession::new())),
            cart,
            gateway,
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CheckoutSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies an action under the session lock.
    ///
    /// The session is left untouched when the reducer refuses.
    fn apply(session: &mut CheckoutSession, action: CheckoutAction) -> Result<(), CoreError> {
        *session = checkout::reduce(session.clone(), action)?;
        Ok(())
    }

    // =========================================================================
    // Step Transitions
    // =========================================================================

    /// Opens the checkout modal from the cart drawer.
    pub fn open(&self) -> CheckoutSession {
        self.cart.set_open(false);
        let session = self.lock().clone();
        info!(session_id = %session.id(), step = %session.step(), "Checkout opened");
        session
    }

    /// Closes the modal. The next open starts from the shipping form.
    ///
    /// The cart is not touched: an order that went through stays cleared.
    pub fn close(&self) -> StoreResult<()> {
        let mut session = self.lock();
        let old_id = session.id();
        Self::apply(&mut session, CheckoutAction::Close)?;
        info!(%old_id, session_id = %session.id(), "Checkout closed");
        Ok(())
    }

    /// Submits the shipping form and moves on to payment.
    pub fn submit_shipping(&self, info: ShippingInfo) -> StoreResult<CheckoutStep> {
        let mut session = self.lock();
        Self::apply(&mut session, CheckoutAction::SubmitShipping(info))?;
        info!(session_id = %session.id(), "Shipping details accepted");
        Ok(session.step())
    }

    /// Goes back from payment to the shipping form.
    pub fn back(&self) -> StoreResult<CheckoutStep> {
        let mut session = self.lock();
        Self::apply(&mut session, CheckoutAction::Back)?;
        debug!(session_id = %session.id(), "Back to shipping");
        Ok(session.step())
    }

    /// Submits the payment form and places the order.
    ///
    /// ## Returns
    /// - `Ok(Confirmed)` once the gateway approved and the cart was cleared
    /// - `Ok(Ignored)` if a payment for this session is already in flight
    /// - `Err(StoreError::Payment)` when the payment failed for good; the
    ///   session stays on the payment step with shipping and cart intact
    ///
    /// Once the payment has begun it settles on its own task, so dropping
    /// the returned future only stops waiting for the outcome.
    pub async fn submit_payment(&self, info: PaymentInfo) -> StoreResult<PaymentOutcome> {
        let (request, item_count) = {
            let mut session = self.lock();
            match Self::apply(&mut session, CheckoutAction::BeginPayment(info)) {
                Ok(()) => {}
                Err(CoreError::PaymentInProgress) => {
                    warn!(session_id = %session.id(), "Payment already in flight, ignoring submit");
                    return Ok(PaymentOutcome::Ignored);
                }
                Err(e) => return Err(e.into()),
            }

            let totals = self.cart.totals();
            let request = PaymentRequest {
                session_id: session.id(),
                amount: totals.total,
                card_last_four: session
                    .payment()
                    .map(PaymentInfo::card_last_four)
                    .unwrap_or_default(),
            };
            (request, totals.item_count)
        };

        info!(
            session_id = %request.session_id,
            amount = %request.amount,
            items = item_count,
            "Processing payment"
        );

        let flow = self.clone();
        let settle = tokio::spawn(async move { flow.settle_payment(request, item_count).await });

        match settle.await {
            Ok(result) => result,
            Err(join_err) => {
                // The task died without settling; release the session.
                let mut session = self.lock();
                if session.is_processing() {
                    Self::apply(&mut session, CheckoutAction::PaymentFailed)?;
                }
                error!(session_id = %session.id(), error = %join_err, "Payment task failed");
                Err(PaymentError::Unavailable(join_err.to_string()).into())
            }
        }
    }

    /// Charges the gateway and records the result on the session.
    async fn settle_payment(
        &self,
        request: PaymentRequest,
        item_count: u64,
    ) -> StoreResult<PaymentOutcome> {
        match self.charge_with_retry(&request).await {
            Ok(receipt) => self.complete_order(&request, &receipt, item_count),
            Err(e) => {
                let mut session = self.lock();
                Self::apply(&mut session, CheckoutAction::PaymentFailed)?;
                warn!(session_id = %request.session_id, error = %e, "Payment failed");
                Err(e.into())
            }
        }
    }

    /// Records the approved payment and clears the cart, under one lock.
    fn complete_order(
        &self,
        request: &PaymentRequest,
        receipt: &PaymentReceipt,
        item_count: u64,
    ) -> StoreResult<PaymentOutcome> {
        let mut session = self.lock();
        let shipping = session.shipping().cloned().unwrap_or_default();
        let confirmation = OrderConfirmation::synthesize(
            &shipping,
            request.amount,
            item_count,
            Utc::now(),
            &self.config.order_prefix,
            &self.config.delivery_estimate,
        );

        Self::apply(
            &mut session,
            CheckoutAction::PaymentSucceeded(confirmation.clone()),
        )?;
        self.cart.clear_cart();

        info!(
            session_id = %request.session_id,
            order_id = %confirmation.order_id,
            reference = %receipt.reference,
            total = %confirmation.total,
            "Order placed"
        );
        Ok(PaymentOutcome::Confirmed(confirmation))
    }

    /// Calls the gateway, retrying timeouts and outages with backoff.
    async fn charge_with_retry(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, PaymentError> {
        let mut backoff = self.create_backoff();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let result = match timeout(self.config.payment_timeout(), self.gateway.charge(request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(PaymentError::Timeout(self.config.payment_timeout_ms)),
            };

            let err = match result {
                Ok(receipt) => return Ok(receipt),
                Err(e) => e,
            };

            if !err.is_retryable() || attempt >= self.config.max_payment_attempts {
                return Err(err);
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    warn!(
                        attempt,
                        max_attempts = self.config.max_payment_attempts,
                        ?duration,
                        error = %err,
                        "Payment attempt failed, retrying"
                    );
                    tokio::time::sleep(duration).await;
                }
                None => return Err(err),
            }
        }
    }

    /// Creates the exponential backoff configuration.
    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.config.initial_backoff(),
            initial_interval: self.config.initial_backoff(),
            multiplier: 2.0,
            max_elapsed_time: None, // Bounded by max_payment_attempts instead
            ..Default::default()
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Copy of the session, for rendering.
    pub fn session(&self) -> CheckoutSession {
        self.lock().clone()
    }

    pub fn session_id(&self) -> Uuid {
        self.lock().id()
    }

    pub fn step(&self) -> CheckoutStep {
        self.lock().step()
    }

    pub fn is_processing(&self) -> bool {
        self.lock().is_processing()
    }

    pub fn confirmation(&self) -> Option<OrderConfirmation> {
        self.lock().confirmation().cloned()
    }

    pub fn shipping(&self) -> Option<ShippingInfo> {
        self.lock().shipping().cloned()
    }

    /// The cart this checkout places orders for.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
