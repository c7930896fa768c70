//! Seed the data directory with the sample catalog.

use thiserror::Error;

use techshop_core::Price;
use techshop_storefront::db::{JsonStore, ProductRepository, RepositoryError};
use techshop_storefront::models::product::ProductFields;

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Persistence failure.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// A sample price failed to parse. Only reachable if the sample data
    /// itself is edited badly.
    #[error("invalid sample price: {0}")]
    InvalidPrice(#[from] rust_decimal::Error),
}

struct SampleProduct {
    name: &'static str,
    price: &'static str,
    category: &'static str,
    image: &'static str,
    description: &'static str,
    stock: u32,
}

const SAMPLE_PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        name: "Gaming Laptop",
        price: "1299.99",
        category: "Electronics",
        image: "💻",
        description: "High-performance gaming laptop with RTX 4060",
        stock: 15,
    },
    SampleProduct {
        name: "Wireless Mouse",
        price: "49.99",
        category: "Electronics",
        image: "🖱️",
        description: "Ergonomic wireless mouse with RGB lighting",
        stock: 50,
    },
    SampleProduct {
        name: "Mechanical Keyboard",
        price: "89.99",
        category: "Electronics",
        image: "⌨️",
        description: "Mechanical keyboard with blue switches",
        stock: 30,
    },
    SampleProduct {
        name: "Smartphone",
        price: "799.99",
        category: "Electronics",
        image: "📱",
        description: "Latest smartphone with 5G capability",
        stock: 25,
    },
    SampleProduct {
        name: "Coffee Mug",
        price: "14.99",
        category: "Home",
        image: "☕",
        description: "Ceramic coffee mug with funny design",
        stock: 100,
    },
    SampleProduct {
        name: "T-Shirt",
        price: "24.99",
        category: "Clothing",
        image: "👕",
        description: "100% cotton t-shirt, various sizes available",
        stock: 75,
    },
];

/// Seed the catalog with sample products.
///
/// An existing catalog is left untouched unless `force` is set, so
/// rerunning the seeder never clobbers live data by accident.
///
/// # Errors
///
/// Returns `SeedError` if the collections cannot be read or written.
pub async fn run(data_dir: &str, force: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let store = JsonStore::open(data_dir);
    let products = ProductRepository::new(&store);

    let existing = products.all()?;
    if !existing.is_empty() && !force {
        tracing::info!(
            count = existing.len(),
            "Catalog already seeded; use --force to replace it"
        );
        return Ok(());
    }

    if force {
        for product in &existing {
            products.delete(product.id).await?;
        }
    }

    for sample in SAMPLE_PRODUCTS {
        let product = products
            .create(ProductFields {
                name: sample.name.to_owned(),
                price: sample.price.parse::<Price>()?,
                category: sample.category.to_owned(),
                image: sample.image.to_owned(),
                description: sample.description.to_owned(),
                stock: sample.stock,
            })
            .await?;
        tracing::info!(id = %product.id, name = %product.name, "Seeded product");
    }

    tracing::info!(
        count = SAMPLE_PRODUCTS.len(),
        data_dir,
        "Catalog seeded successfully"
    );
    tracing::info!("Create an admin account with: techshop-cli admin create -e <email> -p <password>");

    Ok(())
}
