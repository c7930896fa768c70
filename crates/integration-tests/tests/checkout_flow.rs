//! End-to-end cart and checkout pipeline tests.

#![allow(clippy::unwrap_used)]

use techshop_core::{OrderStatus, Price, ProductId};

use techshop_integration_tests::TestContext;
use techshop_storefront::db::{OrderRepository, ProductRepository};
use techshop_storefront::models::cart::Cart;
use techshop_storefront::services::cart::{CartService, shipping_fee, total_with_shipping};
use techshop_storefront::services::checkout::{CheckoutError, CheckoutForm, CheckoutService};

fn shipping_form() -> CheckoutForm {
    CheckoutForm {
        full_name: "Amina Benali".to_string(),
        phone: "0612345678".to_string(),
        city: "Rabat".to_string(),
        address: "12 Rue Example".to_string(),
    }
}

#[tokio::test]
async fn cart_accumulates_until_stock_runs_out() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;
    let carts = CartService::new(&ctx.store);
    let laptop = ProductId::new(1);

    let mut cart = Cart::default();
    carts.add(&mut cart, laptop, 5).unwrap();
    // 5 + 11 = 16 > 15 in stock: rejected, cart unchanged
    assert!(carts.add(&mut cart, laptop, 11).is_err());
    assert_eq!(cart.quantity(laptop), 5);
    // Topping up to exactly the stock is fine
    carts.add(&mut cart, laptop, 10).unwrap();
    assert_eq!(cart.quantity(laptop), 15);
}

#[tokio::test]
async fn shipping_is_waived_at_the_threshold() {
    // Subtotal 480: flat fee applies
    assert_eq!(shipping_fee(Price::from(480)), Price::from(45));
    assert_eq!(total_with_shipping(Price::from(480)), Price::from(525));

    // Subtotal 500: free
    assert_eq!(shipping_fee(Price::from(500)), Price::ZERO);
    assert_eq!(total_with_shipping(Price::from(500)), Price::from(500));
}

#[tokio::test]
async fn checkout_pipeline_end_to_end() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    let carts = CartService::new(&ctx.store);
    let checkout = CheckoutService::new(&ctx.store);
    let products = ProductRepository::new(&ctx.store);
    let orders = OrderRepository::new(&ctx.store);

    let mut cart = Cart::default();
    carts.add(&mut cart, ProductId::new(1), 1).unwrap();
    carts.add(&mut cart, ProductId::new(3), 2).unwrap();

    let order = checkout
        .place_order(&mut cart, &shipping_form(), None)
        .await
        .unwrap();

    // Order captured both lines with totals summing to the aggregate
    assert_eq!(order.items.len(), 2);
    let line_sum: Price = order.items.iter().map(|i| i.total).sum();
    assert_eq!(order.total, line_sum);
    assert_eq!(order.total.to_string(), "1329.97");
    assert_eq!(order.status, OrderStatus::Processing);

    // Stock decremented by exactly the ordered quantities
    assert_eq!(products.get(ProductId::new(1)).unwrap().unwrap().stock, 14);
    assert_eq!(products.get(ProductId::new(3)).unwrap().unwrap().stock, 98);

    // Cart cleared, order persisted and trackable
    assert!(cart.is_empty());
    let tracked = orders
        .find_for_tracking(order.id, "0612345678")
        .unwrap()
        .unwrap();
    assert_eq!(tracked.id, order.id);
    assert!(orders
        .find_for_tracking(order.id, "0600000000")
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn empty_cart_checkout_is_rejected_without_an_order() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;
    let checkout = CheckoutService::new(&ctx.store);

    let mut cart = Cart::default();
    let result = checkout.place_order(&mut cart, &shipping_form(), None).await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(OrderRepository::new(&ctx.store).all().unwrap().is_empty());
}

#[tokio::test]
async fn oversell_between_add_and_checkout_is_caught() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    let carts = CartService::new(&ctx.store);
    let checkout = CheckoutService::new(&ctx.store);
    let products = ProductRepository::new(&ctx.store);
    let laptop = ProductId::new(1);

    let mut cart = Cart::default();
    carts.add(&mut cart, laptop, 10).unwrap();

    // A competing checkout depletes the stock first
    products.reserve(&[(laptop, 10)]).await.unwrap();

    let result = checkout.place_order(&mut cart, &shipping_form(), None).await;
    assert!(matches!(
        result,
        Err(CheckoutError::InsufficientStock { .. })
    ));

    // Stock was not driven negative, no order was written, cart kept
    assert_eq!(products.get(laptop).unwrap().unwrap().stock, 5);
    assert!(OrderRepository::new(&ctx.store).all().unwrap().is_empty());
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn order_ids_stay_sequential() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    let carts = CartService::new(&ctx.store);
    let checkout = CheckoutService::new(&ctx.store);

    for expected_id in 1..=3 {
        let mut cart = Cart::default();
        carts.add(&mut cart, ProductId::new(3), 1).unwrap();
        let order = checkout
            .place_order(&mut cart, &shipping_form(), None)
            .await
            .unwrap();
        assert_eq!(order.id.as_i32(), expected_id);
    }
}
