//! # Checkout
//!
//! The checkout session and its reducer.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Steps                                   │
//! │                                                                         │
//! │   ┌──────────┐  SubmitShipping   ┌──────────┐  PaymentSucceeded        │
//! │   │ Shipping │ ────────────────► │ Payment  │ ──────────────────┐      │
//! │   └──────────┘ ◄──────────────── └────┬─────┘                   │      │
//! │        ▲           Back               │  ▲                      ▼      │
//! │        │                 BeginPayment │  │ PaymentFailed ┌──────────────┐
//! │        │                              ▼  │               │ Confirmation │
//! │        │                      is_processing = true       └──────┬───────┘
//! │        │                                                        │      │
//! │        └──────────────────── Close (fresh session) ◄────────────┘      │
//! │                                                                         │
//! │  Close is refused while a payment is in flight.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `confirmation` is `Some` exactly when the step is `Confirmation`
//! - `Confirmation` is only reached through `BeginPayment` then
//!   `PaymentSucceeded`
//! - At most one payment is in flight per session (`is_processing`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_payment_info, validate_shipping_info};

// =============================================================================
// Checkout Step
// =============================================================================

/// Where the customer is in the checkout modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    /// Terminal. Only `Close` leaves it.
    Confirmation,
}

impl CheckoutStep {
    /// Steps in progress-indicator order.
    pub const ALL: [CheckoutStep; 3] = [
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::Confirmation,
    ];

    /// Zero-based position in the progress indicator.
    pub const fn index(&self) -> usize {
        match self {
            CheckoutStep::Shipping => 0,
            CheckoutStep::Payment => 1,
            CheckoutStep::Confirmation => 2,
        }
    }

    /// Progress indicator caption.
    pub const fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirm",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStep::Shipping => write!(f, "shipping"),
            CheckoutStep::Payment => write!(f, "payment"),
            CheckoutStep::Confirmation => write!(f, "confirmation"),
        }
    }
}

// =============================================================================
// Form Data
// =============================================================================

/// The shipping form. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip: String,
}

impl ShippingInfo {
    /// "Shipping to" line of the confirmation: `address, city`.
    pub fn ship_to(&self) -> String {
        format!("{}, {}", self.address.trim(), self.city.trim())
    }
}

/// The payment form. Every field is required.
///
/// Never serialized back out and never logged in full: `Debug` shows only
/// the last four card digits and hides the CVV.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentInfo {
    /// Last four non-space characters of the card number.
    pub fn card_last_four(&self) -> String {
        let compact: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let start = compact.len().saturating_sub(4);
        compact[start..].iter().collect()
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &format_args!("**** {}", self.card_last_four()))
            .field("card_name", &self.card_name)
            .field("expiry", &self.expiry)
            .field("cvv", &format_args!("***"))
            .finish()
    }
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// Synthesized order number, e.g. `LUM-12345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderId(String);

impl OrderId {
    /// `prefix` + `-` + the last eight decimal digits of the millisecond
    /// timestamp, zero padded.
    pub fn from_timestamp(prefix: &str, at: DateTime<Utc>) -> Self {
        let digits = at.timestamp_millis().rem_euclid(100_000_000);
        OrderId(format!("{prefix}-{digits:08}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the confirmation screen shows once the payment went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub shipping_to: String,
    pub estimated_delivery: String,
    pub total: Money,
    pub item_count: u64,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Builds the confirmation for an order placed at `placed_at`.
    ///
    /// `total` and `item_count` are the cart figures captured when the
    /// payment started.
    pub fn synthesize(
        shipping: &ShippingInfo,
        total: Money,
        item_count: u64,
        placed_at: DateTime<Utc>,
        order_prefix: &str,
        delivery_estimate: &str,
    ) -> Self {
        OrderConfirmation {
            order_id: OrderId::from_timestamp(order_prefix, placed_at),
            shipping_to: shipping.ship_to(),
            estimated_delivery: delivery_estimate.to_string(),
            total,
            item_count,
            placed_at,
        }
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One pass through the checkout modal.
///
/// Fields are read-only from outside; the only way to change a session is
/// [`reduce`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    #[ts(as = "String")]
    id: Uuid,
    step: CheckoutStep,
    shipping: Option<ShippingInfo>,
    #[serde(skip)]
    payment: Option<PaymentInfo>,
    is_processing: bool,
    confirmation: Option<OrderConfirmation>,
    #[ts(as = "String")]
    opened_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// A fresh session on the shipping step.
    pub fn new() -> Self {
        CheckoutSession {
            id: Uuid::new_v4(),
            step: CheckoutStep::Shipping,
            shipping: None,
            payment: None,
            is_processing: false,
            confirmation: None,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Shipping form as last submitted.
    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    pub fn payment(&self) -> Option<&PaymentInfo> {
        self.payment.as_ref()
    }

    /// True while a payment attempt is in flight.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Checkout Actions
// =============================================================================

/// Every way the checkout can move.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutAction {
    SubmitShipping(ShippingInfo),
    Back,
    BeginPayment(PaymentInfo),
    PaymentSucceeded(OrderConfirmation),
    PaymentFailed,
    /// Dismiss the modal. The next open starts over.
    Close,
}

impl CheckoutAction {
    /// Human readable verb, used in [`CoreError::InvalidTransition`].
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutAction::SubmitShipping(_) => "submit shipping",
            CheckoutAction::Back => "go back",
            CheckoutAction::BeginPayment(_) => "submit payment",
            CheckoutAction::PaymentSucceeded(_) => "confirm payment",
            CheckoutAction::PaymentFailed => "fail payment",
            CheckoutAction::Close => "close checkout",
        }
    }
}

/// Applies `action` to `session`.
///
/// ## Errors
/// - [`CoreError::Validation`] when a form has a blank required field
/// - [`CoreError::PaymentInProgress`] for `BeginPayment`, `Back` or `Close`
///   while a payment is in flight
/// - [`CoreError::InvalidTransition`] for any action the current step does
///   not accept
///
/// On error the caller still owns nothing new: the session passed in is
/// consumed, so callers that need to keep it should clone first.
pub fn reduce(mut session: CheckoutSession, action: CheckoutAction) -> CoreResult<CheckoutSession> {
    let step = session.step;

    match (step, action) {
        (_, CheckoutAction::Close) => {
            if session.is_processing {
                return Err(CoreError::PaymentInProgress);
            }
            Ok(CheckoutSession::new())
        }

        (CheckoutStep::Shipping, CheckoutAction::SubmitShipping(info)) => {
            validate_shipping_info(&info)?;
            session.shipping = Some(info);
            session.step = CheckoutStep::Payment;
            Ok(session)
        }

        (CheckoutStep::Payment, CheckoutAction::Back) => {
            if session.is_processing {
                return Err(CoreError::PaymentInProgress);
            }
            session.step = CheckoutStep::Shipping;
            Ok(session)
        }

        (CheckoutStep::Payment, CheckoutAction::BeginPayment(info)) => {
            if session.is_processing {
                return Err(CoreError::PaymentInProgress);
            }
            validate_payment_info(&info)?;
            session.payment = Some(info);
            session.is_processing = true;
            Ok(session)
        }

        (CheckoutStep::Payment, CheckoutAction::PaymentSucceeded(confirmation))
            if session.is_processing =>
        {
            session.is_processing = false;
            session.confirmation = Some(confirmation);
            session.step = CheckoutStep::Confirmation;
            Ok(session)
        }

        (CheckoutStep::Payment, CheckoutAction::PaymentFailed) if session.is_processing => {
            session.is_processing = false;
            Ok(session)
        }

        (step, action) => Err(CoreError::InvalidTransition {
            step,
            action: action.name(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
