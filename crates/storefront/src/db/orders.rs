//! Order repository.

use chrono::Utc;
use thiserror::Error;

use techshop_core::{OrderId, OrderStatus};

use super::{Collection, JsonStore, RepositoryError};
use crate::models::order::{NewOrder, Order};
use crate::models::user::User;

/// Collection name for orders.
pub const COLLECTION: &str = "orders";

/// Error from [`OrderRepository::update_status`].
#[derive(Debug, Error)]
pub enum StatusError {
    /// The transition table forbids this move.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Repository for placed orders.
#[derive(Clone)]
pub struct OrderRepository {
    orders: Collection<Order>,
}

impl OrderRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            orders: store.collection(COLLECTION),
        }
    }

    /// All orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.orders.load()
    }

    /// Look up an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|o| o.id == id))
    }

    /// Orders belonging to a user: placed while logged in as them, or
    /// carrying their phone number as the delivery contact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn for_user(&self, user: &User) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.all()?;
        orders.retain(|o| {
            o.user_id == Some(user.id) || user.phone.as_deref() == Some(o.customer_phone.as_str())
        });
        Ok(orders)
    }

    /// Guest order tracking: the order ID and the delivery phone number
    /// must both match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn find_for_tracking(
        &self,
        id: OrderId,
        phone: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .all()?
            .into_iter()
            .find(|o| o.id == id && o.customer_phone == phone))
    }

    /// Persist a new order with the next free ID, status `Processing`, and
    /// the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` on persistence failure.
    pub async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        self.orders
            .with_mut(|orders| {
                let id = orders.iter().map(|o| o.id.as_i32()).max().unwrap_or(0) + 1;
                let order = Order {
                    id: OrderId::new(id),
                    customer_name: new.customer_name,
                    customer_phone: new.customer_phone,
                    customer_city: new.customer_city,
                    customer_address: new.customer_address,
                    payment_method: new.payment_method,
                    user_id: new.user_id,
                    items: new.items,
                    total: new.total,
                    status: OrderStatus::Processing,
                    created_at: Utc::now(),
                };
                orders.push(order.clone());
                Ok(order)
            })
            .await
    }

    /// Move an order to a new status, enforcing the transition table.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidTransition` for a forbidden move and
    /// `RepositoryError::NotFound` for an unknown order.
    pub async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, StatusError> {
        self.orders
            .with_mut(|orders| {
                let order = orders
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or(RepositoryError::NotFound)?;

                if !order.status.can_transition_to(next) {
                    return Err(StatusError::InvalidTransition {
                        from: order.status,
                        to: next,
                    });
                }

                order.status = next;
                Ok(order.clone())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use techshop_core::{Email, Price, UserId};

    use crate::models::order::PAYMENT_CASH_ON_DELIVERY;

    fn new_order(phone: &str, user_id: Option<UserId>) -> NewOrder {
        NewOrder {
            customer_name: "Amina".to_string(),
            customer_phone: phone.to_string(),
            customer_city: "Rabat".to_string(),
            customer_address: "12 Rue Example".to_string(),
            payment_method: PAYMENT_CASH_ON_DELIVERY.to_string(),
            user_id,
            items: Vec::new(),
            total: Price::from(100),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let repo = OrderRepository::new(&JsonStore::in_memory());
        let first = repo.create(new_order("0611111111", None)).await.unwrap();
        let second = repo.create(new_order("0622222222", None)).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(first.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_tracking_requires_both_id_and_phone() {
        let repo = OrderRepository::new(&JsonStore::in_memory());
        let order = repo.create(new_order("0611111111", None)).await.unwrap();

        assert!(repo
            .find_for_tracking(order.id, "0611111111")
            .unwrap()
            .is_some());
        assert!(repo
            .find_for_tracking(order.id, "0699999999")
            .unwrap()
            .is_none());
        assert!(repo
            .find_for_tracking(OrderId::new(99), "0611111111")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_for_user_matches_id_or_phone() {
        let repo = OrderRepository::new(&JsonStore::in_memory());
        repo.create(new_order("0611111111", Some(UserId::new(1))))
            .await
            .unwrap();
        repo.create(new_order("0622222222", None)).await.unwrap();
        repo.create(new_order("0633333333", Some(UserId::new(2))))
            .await
            .unwrap();

        let user = User {
            id: UserId::new(1),
            name: "Amina".to_string(),
            email: Email::parse("amina@example.com").unwrap(),
            phone: Some("0622222222".to_string()),
            password_hash: String::new(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let orders = repo.for_user(&user).unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[tokio::test]
    async fn test_status_transitions_enforced() {
        let repo = OrderRepository::new(&JsonStore::in_memory());
        let order = repo.create(new_order("0611111111", None)).await.unwrap();

        // Processing -> Delivered skips Shipped
        let result = repo.update_status(order.id, OrderStatus::Delivered).await;
        assert!(matches!(result, Err(StatusError::InvalidTransition { .. })));

        let shipped = repo
            .update_status(order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);

        let delivered = repo
            .update_status(order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);

        // Terminal: no way out
        let result = repo.update_status(order.id, OrderStatus::Cancelled).await;
        assert!(matches!(result, Err(StatusError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let repo = OrderRepository::new(&JsonStore::in_memory());
        let result = repo
            .update_status(OrderId::new(5), OrderStatus::Shipped)
            .await;
        assert!(matches!(
            result,
            Err(StatusError::Repository(RepositoryError::NotFound))
        ));
    }
}
