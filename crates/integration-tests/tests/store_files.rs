//! On-disk collection format and durability tests.

#![allow(clippy::unwrap_used)]

use serde_json::Value;

use techshop_core::ProductId;

use techshop_integration_tests::TestContext;
use techshop_storefront::db::{JsonStore, ProductRepository, RepositoryError};

#[tokio::test]
async fn collections_survive_a_reopen() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    // Mutate through one store handle
    ProductRepository::new(&ctx.store)
        .reserve(&[(ProductId::new(1), 3)])
        .await
        .unwrap();

    // A store reopened over the same directory sees the same state
    let reopened = JsonStore::open(ctx.data_dir());
    let product = ProductRepository::new(&reopened)
        .get(ProductId::new(1))
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 12);
}

#[tokio::test]
async fn product_file_keeps_the_flat_json_shape() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    let raw = std::fs::read_to_string(ctx.data_dir().join("products.json")).unwrap();
    let parsed: Value = serde_json::from_str(&raw).unwrap();

    // One JSON array of records, prices as plain numbers
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 4);
    let first = records.first().unwrap();
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Gaming Laptop");
    assert!(first["price"].is_number());
    assert!(first["stock"].is_number());
}

#[tokio::test]
async fn missing_collection_reads_as_no_data_yet() {
    let ctx = TestContext::new();
    // Nothing seeded: no file at all
    assert!(!ctx.data_dir().join("products.json").exists());

    let products = ProductRepository::new(&ctx.store).all().unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn corrupt_collection_surfaces_as_an_error_not_empty() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    std::fs::write(ctx.data_dir().join("products.json"), b"{truncated").unwrap();

    let result = ProductRepository::new(&ctx.store).all();
    assert!(matches!(result, Err(RepositoryError::Corrupt { .. })));
}

#[tokio::test]
async fn writes_leave_no_temp_files_behind() {
    let ctx = TestContext::new();
    ctx.seed_catalog().await;

    let leftovers: Vec<_> = std::fs::read_dir(ctx.data_dir())
        .unwrap()
        .filter_map(|entry| {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy().into_owned();
            name.ends_with(".tmp").then_some(name)
        })
        .collect();

    assert!(leftovers.is_empty(), "stray temp files: {leftovers:?}");
}
