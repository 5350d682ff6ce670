//! End-to-end storefront session: browse, fill the cart, check out.

use std::sync::Arc;
use std::time::Duration;

use lumiere_core::checkout::{CheckoutStep, PaymentInfo, ShippingInfo};
use lumiere_core::{Catalog, Category, Money, SortOrder};
use lumiere_store::{
    ApiError, CartStore, CheckoutConfig, CheckoutFlow, ErrorCode, PaymentOutcome,
    SimulatedGateway,
};

fn shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Marie".into(),
        last_name: "Curie".into(),
        email: "marie@example.com".into(),
        phone: "+33 1 00 00 00 00".into(),
        address: "11 Rue Pierre et Marie Curie".into(),
        city: "Paris".into(),
        country: "France".into(),
        zip: "75005".into(),
    }
}

fn card() -> PaymentInfo {
    PaymentInfo {
        card_number: "5555 5555 5555 4444".into(),
        card_name: "Marie Curie".into(),
        expiry: "07/28".into(),
        cvv: "999".into(),
    }
}

fn session(cart: &CartStore) -> CheckoutFlow {
    let config = CheckoutConfig::default();
    let gateway = Arc::new(SimulatedGateway::new(config.payment_delay()));
    CheckoutFlow::new(cart.clone(), gateway, config)
}

#[tokio::test(start_paused = true)]
async fn test_full_purchase() {
    let catalog = Catalog::builtin();
    let cart = CartStore::new();
    let checkout = session(&cart);

    // "Add to Cart" twice on the Eternal Diamond Ring
    cart.add_product(&catalog, "1", 1).unwrap();
    cart.add_product(&catalog, "1", 1).unwrap();

    let state = cart.snapshot();
    assert_eq!(state.line_count(), 1);
    assert_eq!(state.line("1", None).map(|l| l.quantity), Some(2));
    assert_eq!(state.subtotal(), Money::from_major(9998));
    assert_eq!(state.item_count(), 2);

    assert!(cart.update_quantity("1", 1, None));
    assert_eq!(cart.subtotal(), Money::from_major(4999));

    checkout.open();
    assert_eq!(checkout.submit_shipping(shipping()).unwrap(), CheckoutStep::Payment);

    let outcome = checkout.submit_payment(card()).await.unwrap();
    let confirmation = match outcome {
        PaymentOutcome::Confirmed(confirmation) => confirmation,
        other => panic!("expected a confirmation, got {other:?}"),
    };

    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
    assert_eq!(cart.snapshot().line_count(), 0);

    let order_id = confirmation.order_id.as_str();
    assert!(order_id.starts_with("LUM-"));
    assert!(order_id["LUM-".len()..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(confirmation.total, Money::from_major(4999));
    assert_eq!(confirmation.shipping_to, "11 Rue Pierre et Marie Curie, Paris");
    assert_eq!(confirmation.estimated_delivery, "5-7 business days");

    // Closing starts over and does not bring the cart back
    checkout.close().unwrap();
    assert_eq!(checkout.step(), CheckoutStep::Shipping);
    assert!(cart.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_double_click_places_one_order() {
    let catalog = Catalog::builtin();
    let cart = CartStore::new();
    cart.add_product(&catalog, "7", 1).unwrap();

    let checkout = session(&cart);
    checkout.submit_shipping(shipping()).unwrap();

    let second_click = checkout.clone();
    let (a, b) = tokio::join!(
        checkout.submit_payment(card()),
        async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            second_click.submit_payment(card()).await
        }
    );

    assert!(matches!(a.unwrap(), PaymentOutcome::Confirmed(_)));
    assert_eq!(b.unwrap(), PaymentOutcome::Ignored);
    assert!(cart.snapshot().is_empty());
}

#[test]
fn test_browse_then_add() {
    let catalog = Catalog::builtin();

    let rings = catalog.by_category(Some(Category::Rings));
    let cheapest = lumiere_core::catalog::sorted(rings, SortOrder::PriceAsc);
    assert_eq!(cheapest[0].name, "Eternal Diamond Ring");

    let cart = CartStore::new();
    cart.add_product(&catalog, &cheapest[0].id, 2).unwrap();
    assert_eq!(cart.item_count(), 2);
    assert!(cart.is_open());
}

#[test]
fn test_errors_reach_the_ui_as_codes() {
    let catalog = Catalog::builtin();
    let cart = CartStore::new();
    let checkout = session(&cart);

    let err: ApiError = cart.add_product(&catalog, "404", 1).unwrap_err().into();
    assert!(matches!(err.code, ErrorCode::NotFound));

    let mut incomplete = shipping();
    incomplete.email.clear();
    let err: ApiError = checkout.submit_shipping(incomplete).unwrap_err().into();
    assert!(matches!(err.code, ErrorCode::ValidationError));
    assert_eq!(err.message, "email is required");
}
