//! Order domain types.
//!
//! Orders are immutable once created except for their status, which only
//! the admin console may advance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techshop_core::{OrderId, OrderStatus, Price, ProductId, UserId};

/// Payment method recorded on every order. Cash on delivery is the only
/// supported method.
pub const PAYMENT_CASH_ON_DELIVERY: &str = "cash_on_delivery";

/// A single order line, with unit price and line total captured at order
/// time. Later catalog price changes never alter past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at order time.
    pub price: Price,
    /// Line total (`price` x `quantity`) at order time.
    pub total: Price,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID, assigned as max(existing)+1 under the collection
    /// write lock.
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_city: String,
    pub customer_address: String,
    pub payment_method: String,
    /// Placing user, when the order was placed while logged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Captured line items.
    pub items: Vec<OrderItem>,
    /// Aggregate total: the sum of captured line totals. Shipping is a
    /// display-level addition and is not part of this amount.
    pub total: Price,
    pub status: OrderStatus,
    /// Creation timestamp, stored under the collection key `order_date`.
    #[serde(rename = "order_date")]
    pub created_at: DateTime<Utc>,
}

/// Fields for creating an order; the repository assigns ID, status, and
/// timestamp.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_city: String,
    pub customer_address: String,
    pub payment_method: String,
    pub user_id: Option<UserId>,
    pub items: Vec<OrderItem>,
    pub total: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_date_key() {
        let order = Order {
            id: OrderId::new(1),
            customer_name: "Amina".to_string(),
            customer_phone: "0612345678".to_string(),
            customer_city: "Rabat".to_string(),
            customer_address: "12 Rue Example".to_string(),
            payment_method: PAYMENT_CASH_ON_DELIVERY.to_string(),
            user_id: None,
            items: Vec::new(),
            total: Price::ZERO,
            status: OrderStatus::Processing,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("order_date").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["status"], "Processing");
        assert!(value.get("user_id").is_none());
    }
}
