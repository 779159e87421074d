//! Product store operations - Handles the catalog side of the system.
//!
//! This module owns product identity, pricing, and the authoritative stock
//! level. The reconciliation engine never touches the `stock` column directly;
//! it goes through [`set_stock`], which acts as a guarded single-statement
//! write so a product that vanished mid-mutation surfaces as a typed failure
//! instead of a silent no-op. All functions are async and return Result types
//! for proper error handling throughout the system.

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all active (non-deleted) products from the database, ordered alphabetically by name.
///
/// This function is commonly used to display the complete catalog to users,
/// such as in autocomplete suggestions or the product list command.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific product by its name, returning None if not found or deleted.
///
/// This function is used for product lookups when users reference products by name
/// in commands, and ensures that deleted products are not accessible.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific active product by its unique ID.
///
/// A soft-deleted product is reported as absent, matching how the
/// reconciliation engine treats a product that "no longer exists".
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the specified parameters, performing input validation.
///
/// This function validates that the name is not empty, the price is non-negative
/// and finite, the opening stock is non-negative, and trims whitespace from the
/// name. Timestamps are initialized for tracking creation and updates.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The opening stock is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    stock: i64,
) -> Result<product::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidPrice { price });
    }

    if stock < 0 {
        return Err(Error::InvalidQuantity { quantity: stock });
    }

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        stock: Set(stock),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Updates an existing product's name and default price, performing input validation.
///
/// Stock is deliberately not touched here; stock only moves through
/// [`set_stock`] as part of a ledger mutation. Refreshes the updated timestamp.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The product does not exist or is already deleted
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_price: f64,
) -> Result<product::Model> {
    // Validate inputs
    if new_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if new_price < 0.0 || !new_price.is_finite() {
        return Err(Error::InvalidPrice { price: new_price });
    }

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    if *product.is_deleted.as_ref() {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    product.name = Set(new_name.trim().to_string());
    product.price = Set(new_price);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Writes a product's stock level as a single guarded UPDATE statement.
///
/// The write is filtered on the product id and the not-deleted flag, so a
/// product that was removed between the caller's read and this write affects
/// zero rows and is reported as [`Error::StockUpdateFailed`] rather than
/// silently succeeding. Callers run this inside a database transaction
/// alongside their ledger write, which is what makes the pair atomic.
///
/// # Errors
/// Returns an error if:
/// - The write affects no rows (product missing or deleted)
/// - The database update operation fails
pub async fn set_stock<C>(db: &C, product_id: i64, new_stock: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let result = Product::update_many()
        .col_expr(product::Column::Stock, Expr::value(new_stock))
        .col_expr(
            product::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::IsDeleted.eq(false))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::StockUpdateFailed { product_id });
    }

    Ok(())
}

/// Soft deletes a product by marking it as deleted, preserving transaction history.
///
/// Ledger rows keep their denormalized name snapshot, so past transactions
/// remain readable after the product is gone.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist or is already deleted
/// - The database update operation fails
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    if *product.is_deleted.as_ref() {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    product.is_deleted = Set(true);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}
