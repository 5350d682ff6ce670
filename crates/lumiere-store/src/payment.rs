//! # Payment Gateway
//!
//! The async seam between the checkout flow and whatever takes the money.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Payment Round Trip                               │
//! │                                                                         │
//! │  CheckoutFlow                         PaymentGateway                    │
//! │  ────────────                         ──────────────                    │
//! │                                                                         │
//! │  PaymentRequest {                                                       │
//! │    session_id, amount,   ───────────► charge(&request).await            │
//! │    card_last_four                          │                            │
//! │  }                                         ├─► Ok(PaymentReceipt)       │
//! │                                            ├─► Err(Declined)            │
//! │                                            ├─► Err(Unavailable)  retry  │
//! │  tokio::time::timeout ──────────────────── └─► Err(Timeout)      retry  │
//! │                                                                         │
//! │  The full card number and CVV never leave the checkout session.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lumiere_core::Money;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::PaymentError;

/// What the gateway is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Checkout session the charge belongs to.
    pub session_id: Uuid,
    pub amount: Money,
    pub card_last_four: String,
}

/// Proof that a charge went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Gateway-side reference.
    pub reference: String,
    pub amount: Money,
    pub processed_at: DateTime<Utc>,
}

/// Something that can take a payment.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Charges `request.amount`.
    ///
    /// Implementations report refusals as [`PaymentError::Declined`] and
    /// transport trouble as [`PaymentError::Unavailable`]. The caller
    /// enforces its own timeout on top.
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

// =============================================================================
// Simulated Gateway
// =============================================================================

/// Waits a fixed delay and approves every charge.
///
/// Stands in for a real processor in the demo storefront.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        SimulatedGateway::new(Duration::from_millis(lumiere_core::SIMULATED_PAYMENT_DELAY_MS))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        debug!(
            session_id = %request.session_id,
            amount = %request.amount,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating payment"
        );

        tokio::time::sleep(self.delay).await;

        Ok(PaymentReceipt {
            reference: format!("sim_{}", Uuid::new_v4().simple()),
            amount: request.amount,
            processed_at: Utc::now(),
        })
    }
}
