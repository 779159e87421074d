//! Shared test utilities for `StockBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{product, transaction, transaction::TransactionType},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Product name
///
/// # Defaults
/// * `price`: 10.0
/// * `stock`: 0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), 10.0, 0).await
}

/// Creates a test product with custom price and opening stock.
/// Use this when a test needs a specific starting stock level.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), price, stock).await
}

/// Creates a test transaction with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `transaction_type` - Purchase or Sale
/// * `product_id` - Associated product ID
/// * `quantity` - Number of units
///
/// # Defaults
/// * `unit_price`: 10.0
/// * `details`: None
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    transaction_type: TransactionType,
    product_id: i64,
    quantity: i64,
) -> Result<entities::transaction::Model> {
    transaction::create_transaction(db, transaction_type, product_id, quantity, 10.0, None).await
}

/// Sets up a complete test environment with a product that has stock on hand.
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_custom_product(&db, "Test Product", 10.0, 20).await?;
    Ok((db, product))
}
