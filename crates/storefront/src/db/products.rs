//! Product repository.

use thiserror::Error;

use techshop_core::ProductId;

use super::{Collection, JsonStore, RepositoryError};
use crate::models::order::OrderItem;
use crate::models::product::{Product, ProductFields, Review};

/// Collection name for products.
pub const COLLECTION: &str = "products";

/// Error from [`ProductRepository::reserve`].
#[derive(Debug, Error)]
pub enum ReserveError {
    /// A requested quantity exceeds the units on hand.
    #[error("insufficient stock for {name}")]
    InsufficientStock { name: String },

    /// Persistence failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Repository for the product catalog.
#[derive(Clone)]
pub struct ProductRepository {
    products: Collection<Product>,
}

impl ProductRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            products: store.collection(COLLECTION),
        }
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.products.load()
    }

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|p| p.id == id))
    }

    /// Products in `category` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        let mut products = self.all()?;
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
        Ok(products)
    }

    /// Case-insensitive substring search over name, description, and
    /// category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = query.to_lowercase();
        let mut products = self.all()?;
        products.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        });
        Ok(products)
    }

    /// Distinct category names, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let mut categories: Vec<String> = self.all()?.into_iter().map(|p| p.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Create a product with the next free ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` on persistence failure.
    pub async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        self.products
            .with_mut(|products| {
                let id = products.iter().map(|p| p.id.as_i32()).max().unwrap_or(0) + 1;
                let product = Product {
                    id: ProductId::new(id),
                    name: fields.name,
                    price: fields.price,
                    category: fields.category,
                    image: fields.image,
                    description: fields.description,
                    stock: fields.stock,
                    reviews: Vec::new(),
                };
                products.push(product.clone());
                Ok(product)
            })
            .await
    }

    /// Replace every mutable field of a product; ID and reviews are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID.
    pub async fn update(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError> {
        self.products
            .with_mut(|products| {
                let product = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                fields.apply_to(product);
                Ok(product.clone())
            })
            .await
    }

    /// Delete a product.
    ///
    /// Returns `true` if the product existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` on persistence failure.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        self.products
            .with_mut(|products| {
                let before = products.len();
                products.retain(|p| p.id != id);
                Ok(products.len() < before)
            })
            .await
    }

    /// Add a review, replacing any earlier review by the same user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown product.
    pub async fn upsert_review(&self, id: ProductId, review: Review) -> Result<(), RepositoryError> {
        self.products
            .with_mut(|products| {
                let product = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                product.reviews.retain(|r| r.user_id != review.user_id);
                product.reviews.push(review);
                Ok(())
            })
            .await
    }

    /// Decrement stock for a set of order lines, capturing unit prices and
    /// line totals at order time.
    ///
    /// All lines are validated against current stock before anything is
    /// mutated, so a shortfall on any line leaves every product untouched
    /// and stock can never go negative. Lines whose product no longer
    /// exists are dropped, matching the cart totals view.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::InsufficientStock`] on any shortfall.
    pub async fn reserve(
        &self,
        lines: &[(ProductId, u32)],
    ) -> Result<Vec<OrderItem>, ReserveError> {
        self.products
            .with_mut(|products| {
                for &(id, quantity) in lines {
                    if let Some(product) = products.iter().find(|p| p.id == id)
                        && quantity > product.stock
                    {
                        return Err(ReserveError::InsufficientStock {
                            name: product.name.clone(),
                        });
                    }
                }

                let mut items = Vec::new();
                for &(id, quantity) in lines {
                    if let Some(product) = products.iter_mut().find(|p| p.id == id) {
                        product.stock -= quantity;
                        items.push(OrderItem {
                            product_id: product.id,
                            product_name: product.name.clone(),
                            quantity,
                            price: product.price,
                            total: product.price.times(quantity),
                        });
                    }
                }
                Ok(items)
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use techshop_core::{Rating, UserId};

    fn fields(name: &str, category: &str, stock: u32) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            price: "49.99".parse().unwrap(),
            category: category.to_string(),
            image: String::new(),
            description: String::new(),
            stock,
        }
    }

    async fn seeded() -> ProductRepository {
        let repo = ProductRepository::new(&JsonStore::in_memory());
        repo.create(fields("Gaming Laptop", "Electronics", 15))
            .await
            .unwrap();
        repo.create(fields("Wireless Mouse", "Electronics", 50))
            .await
            .unwrap();
        repo.create(fields("Coffee Mug", "Home", 100)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = seeded().await;
        let ids: Vec<i32> = repo.all().unwrap().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_create_after_delete_does_not_reuse_live_ids() {
        let repo = seeded().await;
        assert!(repo.delete(ProductId::new(2)).await.unwrap());

        let created = repo.create(fields("Keyboard", "Electronics", 30)).await.unwrap();
        assert_eq!(created.id, ProductId::new(4));
    }

    #[tokio::test]
    async fn test_by_category_case_insensitive() {
        let repo = seeded().await;
        let home = repo.by_category("home").unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home.first().unwrap().name, "Coffee Mug");
    }

    #[tokio::test]
    async fn test_search_matches_name_and_category() {
        let repo = seeded().await;
        assert_eq!(repo.search("mouse").unwrap().len(), 1);
        assert_eq!(repo.search("electronics").unwrap().len(), 2);
        assert!(repo.search("no-such-thing").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories_distinct_sorted() {
        let repo = seeded().await;
        assert_eq!(repo.categories().unwrap(), vec!["Electronics", "Home"]);
    }

    #[tokio::test]
    async fn test_update_keeps_reviews() {
        let repo = seeded().await;
        repo.upsert_review(
            ProductId::new(1),
            Review {
                user_id: UserId::new(1),
                user_name: "Amina".to_string(),
                rating: Rating::new(5).unwrap(),
                comment: String::new(),
                date: Utc::now(),
            },
        )
        .await
        .unwrap();

        let updated = repo
            .update(ProductId::new(1), fields("Gaming Laptop Pro", "Electronics", 10))
            .await
            .unwrap();
        assert_eq!(updated.name, "Gaming Laptop Pro");
        assert_eq!(updated.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let repo = seeded().await;
        let result = repo
            .update(ProductId::new(99), fields("Ghost", "None", 0))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_second_review_replaces_first() {
        let repo = seeded().await;
        for rating in [2, 4] {
            repo.upsert_review(
                ProductId::new(1),
                Review {
                    user_id: UserId::new(7),
                    user_name: "Karim".to_string(),
                    rating: Rating::new(rating).unwrap(),
                    comment: String::new(),
                    date: Utc::now(),
                },
            )
            .await
            .unwrap();
        }

        let product = repo.get(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews.first().unwrap().rating.as_u8(), 4);
    }

    #[tokio::test]
    async fn test_reserve_decrements_and_captures_totals() {
        let repo = seeded().await;
        let items = repo
            .reserve(&[(ProductId::new(1), 2), (ProductId::new(3), 4)])
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        let first = items.first().unwrap();
        assert_eq!(first.quantity, 2);
        assert_eq!(first.total, first.price.times(2));

        assert_eq!(repo.get(ProductId::new(1)).unwrap().unwrap().stock, 13);
        assert_eq!(repo.get(ProductId::new(3)).unwrap().unwrap().stock, 96);
    }

    #[tokio::test]
    async fn test_reserve_shortfall_mutates_nothing() {
        let repo = seeded().await;
        let result = repo
            .reserve(&[(ProductId::new(1), 2), (ProductId::new(2), 51)])
            .await;

        assert!(matches!(
            result,
            Err(ReserveError::InsufficientStock { .. })
        ));
        // No partial decrement
        assert_eq!(repo.get(ProductId::new(1)).unwrap().unwrap().stock, 15);
        assert_eq!(repo.get(ProductId::new(2)).unwrap().unwrap().stock, 50);
    }

    #[tokio::test]
    async fn test_reserve_drops_vanished_products() {
        let repo = seeded().await;
        let items = repo
            .reserve(&[(ProductId::new(99), 1), (ProductId::new(3), 1)])
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().product_id, ProductId::new(3));
    }
}
