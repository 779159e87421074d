//! Report generation business logic.
//!
//! This module provides functions for summarizing a product's transaction
//! history: units in and out, money totals, and the most recent ledger rows.
//! All functions are framework-agnostic and return structured data that can be
//! formatted by the bot layer.

use crate::{
    core::transaction::TransactionType,
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Represents a stock and revenue summary for a single product.
#[derive(Debug, Clone)]
pub struct ProductReport {
    /// The product being reported on
    pub product: crate::entities::product::Model,
    /// Total units bought across all purchase transactions
    pub units_purchased: i64,
    /// Total units sold across all sale transactions
    pub units_sold: i64,
    /// Money spent on purchases
    pub purchase_total: f64,
    /// Money taken in from sales
    pub sales_total: f64,
    /// Most recent transactions for this product, newest first
    pub recent_transactions: Vec<transaction::Model>,
}

/// Generates a summary report for a specific product.
///
/// Retrieves the product and its full ledger history, aggregates unit and
/// money totals per transaction type, and keeps the most recent rows for
/// display.
///
/// # Arguments
/// * `db` - Database connection
/// * `product_id` - ID of the product to report on
/// * `transaction_limit` - Maximum number of recent transactions to include (default 10)
pub async fn generate_product_report(
    db: &DatabaseConnection,
    product_id: i64,
    transaction_limit: Option<usize>,
) -> Result<ProductReport> {
    let product = crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let history = Transaction::find()
        .filter(transaction::Column::ProductId.eq(product_id))
        .order_by_desc(transaction::Column::TransactionDate)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await?;

    let mut units_purchased = 0;
    let mut units_sold = 0;
    let mut purchase_total = 0.0;
    let mut sales_total = 0.0;

    for row in &history {
        match TransactionType::parse(&row.transaction_type)? {
            TransactionType::Purchase => {
                units_purchased += row.quantity;
                purchase_total += row.total_price;
            }
            TransactionType::Sale => {
                units_sold += row.quantity;
                sales_total += row.total_price;
            }
        }
    }

    let limit = transaction_limit.unwrap_or(10);
    let recent_transactions = history.into_iter().take(limit).collect();

    Ok(ProductReport {
        product,
        units_purchased,
        units_sold,
        purchase_total,
        sales_total,
        recent_transactions,
    })
}
