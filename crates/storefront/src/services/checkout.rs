//! Checkout pipeline.
//!
//! Turns a non-empty cart plus a shipping form into a persisted order:
//! resolve every line against the catalog, capture prices, decrement
//! stock, persist the order, clear the cart.

use serde::Deserialize;
use thiserror::Error;

use techshop_core::{Price, UserId};

use crate::db::products::ReserveError;
use crate::db::{JsonStore, OrderRepository, ProductRepository, RepositoryError};
use crate::models::cart::Cart;
use crate::models::order::{NewOrder, Order, PAYMENT_CASH_ON_DELIVERY};

/// Errors from the checkout pipeline.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout on an empty cart is a no-op, never a zero-item order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A line exceeds current stock; nothing was mutated.
    #[error("not enough stock for {name}")]
    InsufficientStock { name: String },

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ReserveError> for CheckoutError {
    fn from(e: ReserveError) -> Self {
        match e {
            ReserveError::InsufficientStock { name } => Self::InsufficientStock { name },
            ReserveError::Repository(e) => Self::Repository(e),
        }
    }
}

/// Shipping details submitted with checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
}

impl CheckoutForm {
    /// All fields are required; whitespace does not count.
    fn validate(&self) -> Result<(), CheckoutError> {
        for (value, field) in [
            (&self.full_name, "full_name"),
            (&self.phone, "phone"),
            (&self.city, "city"),
            (&self.address, "address"),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Checkout service over the catalog and order collections.
pub struct CheckoutService {
    products: ProductRepository,
    orders: OrderRepository,
}

impl CheckoutService {
    /// Create a new checkout service.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            products: ProductRepository::new(store),
            orders: OrderRepository::new(store),
        }
    }

    /// Place an order from the cart.
    ///
    /// Line prices are captured from the current catalog, stock is
    /// decremented by exactly the ordered quantities, the order is
    /// persisted with status `Processing`, and the cart is cleared. On any
    /// error the cart and the collections are left as they were.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty (or fully vanished)
    /// cart, `CheckoutError::MissingField` for blank shipping fields, and
    /// `CheckoutError::InsufficientStock` when any line exceeds stock.
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        form: &CheckoutForm,
        user_id: Option<UserId>,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        form.validate()?;

        let lines: Vec<_> = cart.lines().collect();
        let items = self.products.reserve(&lines).await?;
        if items.is_empty() {
            // Every product in the cart has vanished from the catalog
            return Err(CheckoutError::EmptyCart);
        }

        let total: Price = items.iter().map(|item| item.total).sum();

        let order = self
            .orders
            .create(NewOrder {
                customer_name: form.full_name.trim().to_owned(),
                customer_phone: form.phone.trim().to_owned(),
                customer_city: form.city.trim().to_owned(),
                customer_address: form.address.trim().to_owned(),
                payment_method: PAYMENT_CASH_ON_DELIVERY.to_owned(),
                user_id,
                items,
                total,
            })
            .await?;

        cart.clear();

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

        Ok(order)
    }
}
