//! Cart service and shipping rules.
//!
//! The cart itself lives in the session ([`crate::models::Cart`]); this
//! service checks its mutations against the catalog and derives totals
//! from current catalog prices.

use thiserror::Error;

use techshop_core::{Price, ProductId};

use crate::db::{JsonStore, ProductRepository, RepositoryError};
use crate::models::cart::Cart;
use crate::models::product::Product;

/// Flat shipping fee in currency units.
const SHIPPING_FLAT_FEE: i64 = 45;

/// Order subtotal at which shipping becomes free.
const FREE_SHIPPING_THRESHOLD: i64 = 500;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product does not exist in the catalog.
    #[error("product not found")]
    ProductNotFound,

    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The cumulative cart quantity would exceed current stock.
    #[error("not enough stock for {name}")]
    InsufficientStock { name: String },

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One resolved cart line.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    /// Current price x quantity.
    pub total: Price,
}

/// Resolved cart contents.
#[derive(Debug, Clone, Default)]
pub struct CartTotals {
    pub lines: Vec<CartLine>,
    /// Sum of line totals, before shipping.
    pub subtotal: Price,
}

/// Cart service over the product catalog.
pub struct CartService {
    products: ProductRepository,
}

impl CartService {
    /// Create a new cart service.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            products: ProductRepository::new(store),
        }
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// The check is cumulative: what is already in the cart plus the
    /// requested amount must fit within current stock, otherwise the cart
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity,
    /// `CartError::ProductNotFound` for an unknown product, and
    /// `CartError::InsufficientStock` when the cumulative quantity would
    /// exceed stock.
    pub fn add(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product = self
            .products
            .get(product_id)?
            .ok_or(CartError::ProductNotFound)?;

        let cumulative = cart.quantity(product_id).saturating_add(quantity);
        if cumulative > product.stock {
            return Err(CartError::InsufficientStock { name: product.name });
        }

        cart.accumulate(product_id, quantity);
        Ok(())
    }

    /// Resolve the cart against the catalog: line totals from the current
    /// price, plus the subtotal. Lines whose product vanished from the
    /// catalog are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the catalog cannot be loaded.
    pub fn totals(&self, cart: &Cart) -> Result<CartTotals, CartError> {
        let products = self.products.all()?;

        let mut totals = CartTotals::default();
        for (product_id, quantity) in cart.lines() {
            let Some(product) = products.iter().find(|p| p.id == product_id) else {
                continue;
            };
            let total = product.price.times(quantity);
            totals.subtotal += total;
            totals.lines.push(CartLine {
                product: product.clone(),
                quantity,
                total,
            });
        }

        Ok(totals)
    }
}

/// Shipping fee for a given subtotal: a flat 45 below the free-shipping
/// threshold of 500, zero from the threshold up.
#[must_use]
pub fn shipping_fee(subtotal: Price) -> Price {
    if subtotal >= Price::from(FREE_SHIPPING_THRESHOLD) {
        Price::ZERO
    } else {
        Price::from(SHIPPING_FLAT_FEE)
    }
}

/// Subtotal plus shipping.
#[must_use]
pub fn total_with_shipping(subtotal: Price) -> Price {
    subtotal + shipping_fee(subtotal)
}
