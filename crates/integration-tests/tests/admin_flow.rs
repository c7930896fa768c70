//! Admin console pipeline tests: login gating, product CRUD, order status
//! transitions.

#![allow(clippy::unwrap_used)]

use techshop_core::{Email, OrderStatus, Price, ProductId, UserId};

use techshop_integration_tests::TestContext;
use techshop_storefront::db::orders::StatusError;
use techshop_storefront::db::{OrderRepository, ProductRepository, UserRepository};
use techshop_storefront::models::order::{NewOrder, PAYMENT_CASH_ON_DELIVERY};
use techshop_storefront::models::product::ProductFields;
use techshop_storefront::models::user::NewUser;
use techshop_storefront::services::auth::{AuthError, AuthService, hash_password};

async fn create_admin(ctx: &TestContext, email: &str, password: &str) {
    UserRepository::new(&ctx.store)
        .create(NewUser {
            name: "Administrator".to_string(),
            email: Email::parse(email).unwrap(),
            phone: None,
            password_hash: hash_password(password).unwrap(),
            is_admin: true,
        })
        .await
        .unwrap();
}

async fn place_order(ctx: &TestContext) -> techshop_storefront::models::order::Order {
    OrderRepository::new(&ctx.store)
        .create(NewOrder {
            customer_name: "Amina".to_string(),
            customer_phone: "0612345678".to_string(),
            customer_city: "Rabat".to_string(),
            customer_address: "12 Rue Example".to_string(),
            payment_method: PAYMENT_CASH_ON_DELIVERY.to_string(),
            user_id: Some(UserId::new(1)),
            items: Vec::new(),
            total: Price::from(100),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn admin_login_accepts_admins_only() {
    let ctx = TestContext::new();
    create_admin(&ctx, "admin@techshop.com", "correct-horse-battery").await;

    let auth = AuthService::new(&ctx.store);

    // Shopper account: same password strength, no admin flag
    auth.register("Amina", "amina@example.com", None, "correct-horse-battery")
        .await
        .unwrap();

    let admin = auth
        .login_admin("admin@techshop.com", "correct-horse-battery")
        .await
        .unwrap();
    assert!(admin.is_admin);

    assert!(matches!(
        auth.login_admin("amina@example.com", "correct-horse-battery").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.login_admin("admin@techshop.com", "wrong").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;
    let products = ProductRepository::new(&ctx.store);

    // Create
    let created = products
        .create(ProductFields {
            name: "Desk Lamp".to_string(),
            price: "34.50".parse().unwrap(),
            category: "Home".to_string(),
            image: String::new(),
            description: "Adjustable LED lamp".to_string(),
            stock: 40,
        })
        .await
        .unwrap();
    assert_eq!(created.id, ProductId::new(5));

    // Full field replace
    let updated = products
        .update(
            created.id,
            ProductFields {
                name: "Desk Lamp Pro".to_string(),
                price: "39.99".parse().unwrap(),
                category: "Home".to_string(),
                image: String::new(),
                description: "Adjustable LED lamp".to_string(),
                stock: 35,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Desk Lamp Pro");
    assert_eq!(updated.stock, 35);

    // Delete
    assert!(products.delete(created.id).await.unwrap());
    assert!(products.get(created.id).unwrap().is_none());
    assert!(!products.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn order_status_walks_the_transition_table() {
    let ctx = TestContext::new();
    let orders = OrderRepository::new(&ctx.store);
    let order = place_order(&ctx).await;

    // Forward walk is allowed
    orders
        .update_status(order.id, OrderStatus::Shipped)
        .await
        .unwrap();
    orders
        .update_status(order.id, OrderStatus::Delivered)
        .await
        .unwrap();

    // Delivered is terminal
    let result = orders.update_status(order.id, OrderStatus::Cancelled).await;
    assert!(matches!(result, Err(StatusError::InvalidTransition { .. })));

    let stored = orders.get(order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn cancellation_is_allowed_before_delivery() {
    let ctx = TestContext::new();
    let orders = OrderRepository::new(&ctx.store);

    let processing = place_order(&ctx).await;
    orders
        .update_status(processing.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let shipped = place_order(&ctx).await;
    orders
        .update_status(shipped.id, OrderStatus::Shipped)
        .await
        .unwrap();
    orders
        .update_status(shipped.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    // Cancelled is terminal too
    let result = orders
        .update_status(processing.id, OrderStatus::Processing)
        .await;
    assert!(matches!(result, Err(StatusError::InvalidTransition { .. })));
}
