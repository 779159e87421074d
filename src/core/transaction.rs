//! Stock reconciliation engine - Handles all ledger mutations.
//!
//! This module provides functions for creating, updating, and deleting inventory
//! transactions. Every mutation computes the stock delta it implies for the
//! affected product, validates it, and applies the stock write together with the
//! ledger write inside a single database transaction, so a ledger entry never
//! exists without its corresponding stock effect. The stock write is always
//! issued before the ledger write; if it is rejected, the mutation aborts with
//! no partial state. All functions are async and return Result types for proper
//! error handling throughout the system.

use crate::{
    core::product,
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

/// Closed set of transaction types.
///
/// The database and the Discord boundary exchange the wire tokens
/// `"Purchase"` and `"Sale"`; everywhere else the type is this enum, so an
/// invalid discriminator is unrepresentable past the parsing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Incoming stock: adds `quantity` units to the product
    Purchase,
    /// Outgoing stock: removes `quantity` units from the product
    Sale,
}

impl TransactionType {
    /// Parses a wire token, rejecting anything but `"Purchase"` or `"Sale"`.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Purchase" => Ok(Self::Purchase),
            "Sale" => Ok(Self::Sale),
            other => Err(Error::InvalidTransactionType {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire token stored in the database and shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Sale => "Sale",
        }
    }

    /// Signed effect of a transaction of this type on the product's stock.
    #[must_use]
    pub const fn effect(self, quantity: i64) -> i64 {
        match self {
            Self::Purchase => quantity,
            Self::Sale => -quantity,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed stock effect of a stored ledger row.
///
/// The stored type token is parsed back into the closed enum; a corrupt token
/// surfaces as [`Error::InvalidTransactionType`] rather than being guessed at.
fn stored_effect(row: &transaction::Model) -> Result<i64> {
    Ok(TransactionType::parse(&row.transaction_type)?.effect(row.quantity))
}

fn validate_amounts(quantity: i64, unit_price: f64) -> Result<()> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    if unit_price < 0.0 || !unit_price.is_finite() {
        return Err(Error::InvalidPrice { price: unit_price });
    }
    Ok(())
}

/// Creates a new transaction and applies its stock effect to the product.
///
/// The product is resolved first; a sale larger than the available stock fails
/// with [`Error::InsufficientStock`] before anything is written. The stock
/// write and the ledger insert share one database transaction, with the stock
/// write first, so a failed stock write leaves the ledger untouched. The
/// inserted row carries a snapshot of the product name and the derived total.
///
/// # Arguments
/// * `transaction_type` - Purchase (stock in) or Sale (stock out)
/// * `product_id` - The product to transact against
/// * `quantity` - Number of units (must be positive)
/// * `unit_price` - Price per unit (must be finite and non-negative)
/// * `details` - Optional free-form note
pub async fn create_transaction(
    db: &DatabaseConnection,
    transaction_type: TransactionType,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
    details: Option<String>,
) -> Result<transaction::Model> {
    validate_amounts(quantity, unit_price)?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let product_row = product::get_product_by_id(&txn, product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    if transaction_type == TransactionType::Sale && product_row.stock < quantity {
        return Err(Error::InsufficientStock {
            available: product_row.stock,
            requested: quantity,
        });
    }

    let new_stock = product_row.stock + transaction_type.effect(quantity);

    info!(
        product_id,
        old_stock = product_row.stock,
        new_stock,
        "Updating stock for {}",
        transaction_type
    );

    // Stock write comes first; a rejected write aborts before the ledger insert
    product::set_stock(&txn, product_id, new_stock).await?;

    let transaction_model = transaction::ActiveModel {
        transaction_type: Set(transaction_type.as_str().to_string()),
        product_id: Set(product_id),
        product_name: Set(product_row.name),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        total_price: Set(quantity as f64 * unit_price),
        details: Set(details),
        transaction_date: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = transaction_model.insert(&txn).await?;

    // Commit the transaction
    txn.commit().await?;

    info!(transaction_id = result.id, "Transaction created");
    Ok(result)
}

/// Updates a transaction in place and reconciles stock on the affected products.
///
/// The new stock level is computed from a back-calculated baseline: the
/// product's stock as if the original transaction had never happened, plus the
/// effect of the edited values. This means an edit lands exactly where a fresh
/// create with the new values would have, with no double-counting of the old
/// effect.
///
/// When the edit moves the transaction to a different product, both sides are
/// reconciled: the old product gets the original effect reversed (clamped at
/// zero, skipped with a warning if the product is gone) and the new product is
/// validated and adjusted as for a fresh create.
///
/// `id` and `transaction_date` are preserved; every other field is overwritten,
/// including a refreshed product-name snapshot.
pub async fn update_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
    transaction_type: TransactionType,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
    details: Option<String>,
) -> Result<transaction::Model> {
    validate_amounts(quantity, unit_price)?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let existing = Transaction::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    let product_row = product::get_product_by_id(&txn, product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let old_effect = stored_effect(&existing)?;
    let new_effect = transaction_type.effect(quantity);

    if existing.product_id == product_id {
        // Same product: undo the old effect, apply the new one
        let baseline = product_row.stock - old_effect;
        let new_stock = baseline + new_effect;

        if transaction_type == TransactionType::Sale && new_stock < 0 {
            return Err(Error::InsufficientStock {
                available: baseline,
                requested: quantity,
            });
        }

        info!(
            transaction_id,
            product_id,
            old_stock = product_row.stock,
            new_stock,
            "Updating transaction and reconciling stock"
        );
        product::set_stock(&txn, product_id, new_stock).await?;
    } else {
        // Product changed: apply to the new product as a fresh create and
        // reverse the original effect on the old product
        let new_stock = product_row.stock + new_effect;
        if transaction_type == TransactionType::Sale && new_stock < 0 {
            return Err(Error::InsufficientStock {
                available: product_row.stock,
                requested: quantity,
            });
        }

        info!(
            transaction_id,
            product_id,
            old_stock = product_row.stock,
            new_stock,
            "Moving transaction to a different product"
        );
        product::set_stock(&txn, product_id, new_stock).await?;

        match product::get_product_by_id(&txn, existing.product_id).await? {
            Some(old_product) => {
                let reversed = (old_product.stock - old_effect).max(0);
                product::set_stock(&txn, old_product.id, reversed).await?;
            }
            None => {
                warn!(
                    transaction_id,
                    old_product_id = existing.product_id,
                    "Original product is gone; skipping stock reversal on it"
                );
            }
        }
    }

    let mut active: transaction::ActiveModel = existing.into();
    active.transaction_type = Set(transaction_type.as_str().to_string());
    active.product_id = Set(product_id);
    active.product_name = Set(product_row.name);
    active.quantity = Set(quantity);
    active.unit_price = Set(unit_price);
    active.total_price = Set(quantity as f64 * unit_price);
    active.details = Set(details);

    let result = active.update(&txn).await?;

    // Commit the transaction
    txn.commit().await?;

    info!(transaction_id, "Transaction updated");
    Ok(result)
}

/// Deletes a transaction and reverses its stock effect on the product.
///
/// The reversal is best-effort: a missing or deleted product, or a rejected
/// stock write, is logged as a warning and does not block the deletion, so a
/// transaction can never become un-deletable. When the product is present the
/// reversed stock is clamped at zero rather than persisting a negative level
/// introduced by upstream drift.
pub async fn delete_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<()> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let existing = Transaction::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    match product::get_product_by_id(&txn, existing.product_id).await? {
        Some(product_row) => {
            let reversed = (product_row.stock - stored_effect(&existing)?).max(0);
            info!(
                transaction_id,
                product_id = product_row.id,
                old_stock = product_row.stock,
                new_stock = reversed,
                "Deleting transaction and reverting stock"
            );
            if let Err(e) = product::set_stock(&txn, product_row.id, reversed).await {
                warn!(
                    transaction_id,
                    product_id = product_row.id,
                    error = %e,
                    "Stock reversal failed; deleting transaction anyway"
                );
            }
        }
        None => {
            warn!(
                transaction_id,
                product_id = existing.product_id,
                "Product no longer exists; deleting transaction without stock reversal"
            );
        }
    }

    existing.delete(&txn).await?;

    // Commit the transaction
    txn.commit().await?;

    info!(transaction_id, "Transaction deleted");
    Ok(())
}

/// Retrieves a specific transaction by its unique ID.
///
/// Returns None if the transaction doesn't exist, allowing callers to handle
/// missing transactions gracefully without throwing errors.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_transaction_type_tokens() -> Result<()> {
        assert_eq!(
            TransactionType::parse("Purchase")?,
            TransactionType::Purchase
        );
        assert_eq!(TransactionType::parse("Sale")?, TransactionType::Sale);
        assert_eq!(TransactionType::Purchase.as_str(), "Purchase");
        assert_eq!(TransactionType::Sale.as_str(), "Sale");

        // Tokens are case-sensitive and closed
        for bad in ["purchase", "SALE", "Refund", ""] {
            let result = TransactionType::parse(bad);
            assert!(matches!(
                result.unwrap_err(),
                Error::InvalidTransactionType { value: _ }
            ));
        }

        Ok(())
    }

    #[test]
    fn test_effect_signs() {
        assert_eq!(TransactionType::Purchase.effect(3), 3);
        assert_eq!(TransactionType::Sale.effect(3), -3);
    }

    #[tokio::test]
    async fn test_create_transaction_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Zero and negative quantities are rejected before any lookup
        let result =
            create_transaction(&db, TransactionType::Purchase, 1, 0, 5.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: 0 }
        ));

        let result =
            create_transaction(&db, TransactionType::Sale, 1, -4, 5.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -4 }
        ));

        // Negative and non-finite prices are rejected
        let result =
            create_transaction(&db, TransactionType::Purchase, 1, 1, -0.5, None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        let result =
            create_transaction(&db, TransactionType::Purchase, 1, 1, f64::NAN, None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            create_transaction(&db, TransactionType::Purchase, 999, 1, 5.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { name: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_adds_stock_and_snapshots() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Blue Widget", 4.25, 2).await?;

        let tx = create_transaction(
            &db,
            TransactionType::Purchase,
            product.id,
            10,
            4.25,
            Some("restock".to_string()),
        )
        .await?;

        assert_eq!(tx.transaction_type, "Purchase");
        assert_eq!(tx.product_id, product.id);
        assert_eq!(tx.product_name, "Blue Widget");
        assert_eq!(tx.quantity, 10);
        assert_eq!(tx.total_price, 42.5);
        assert_eq!(tx.details.as_deref(), Some("restock"));

        let updated = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(updated.stock, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_sale_insufficient_stock_leaves_state_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 10.0, 5).await?;

        // stock=5; sale of 3 succeeds and leaves 2
        create_transaction(&db, TransactionType::Sale, product.id, 3, 10.0, None).await?;
        let after_first = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after_first.stock, 2);

        // Repeating the same sale now fails with available=2, requested=3
        let result =
            create_transaction(&db, TransactionType::Sale, product.id, 3, 10.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock {
                available: 2,
                requested: 3
            }
        ));

        // Stock and ledger unchanged by the failed attempt
        let after_failed = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after_failed.stock, 2);

        let ledger = crate::entities::Transaction::find().all(&db).await?;
        assert_eq!(ledger.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_equals_sum_of_successful_effects() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 1.0, 10).await?;

        // +7 -5 +2 applied; a failing sale of 100 contributes zero
        create_transaction(&db, TransactionType::Purchase, product.id, 7, 1.0, None).await?;
        create_transaction(&db, TransactionType::Sale, product.id, 5, 1.0, None).await?;
        let failed =
            create_transaction(&db, TransactionType::Sale, product.id, 100, 1.0, None).await;
        assert!(failed.is_err());
        create_transaction(&db, TransactionType::Purchase, product.id, 2, 1.0, None).await?;

        let final_product = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(final_product.stock, 10 + 7 - 5 + 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            update_transaction(&db, 999, TransactionType::Sale, 1, 1, 1.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::TransactionNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_recomputes_without_double_counting() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 2.0, 10).await?;

        // Sale of 4 leaves 6
        let tx =
            create_transaction(&db, TransactionType::Sale, product.id, 4, 2.0, None).await?;

        // Editing the quantity to 6 must land at 4 (10 - 6), not 2 (6 - 4 - ...)
        let updated = update_transaction(
            &db,
            tx.id,
            TransactionType::Sale,
            product.id,
            6,
            2.0,
            None,
        )
        .await?;
        assert_eq!(updated.id, tx.id);
        assert_eq!(updated.quantity, 6);
        assert_eq!(updated.total_price, 12.0);
        assert_eq!(updated.transaction_date, tx.transaction_date);

        let after = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_flips_type() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 2.0, 10).await?;

        // Purchase of 5 leaves 15; flipping it to a sale of 5 must land at 5
        let tx =
            create_transaction(&db, TransactionType::Purchase, product.id, 5, 2.0, None)
                .await?;

        update_transaction(&db, tx.id, TransactionType::Sale, product.id, 5, 2.0, None)
            .await?;

        let after = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_rejects_oversized_sale() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 2.0, 10).await?;

        let tx =
            create_transaction(&db, TransactionType::Sale, product.id, 4, 2.0, None).await?;

        // Baseline is 10; a sale of 11 would drive stock to -1
        let result = update_transaction(
            &db,
            tx.id,
            TransactionType::Sale,
            product.id,
            11,
            2.0,
            None,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock {
                available: 10,
                requested: 11
            }
        ));

        // Neither the product's stock nor the row changed
        let after = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 6);
        let row = get_transaction_by_id(&db, tx.id).await?.unwrap();
        assert_eq!(row.quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_moves_transaction_to_other_product() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_custom_product(&db, "First Product", 1.0, 10).await?;
        let second = create_custom_product(&db, "Second Product", 1.0, 10).await?;

        // Sale of 4 against the first product leaves it at 6
        let tx =
            create_transaction(&db, TransactionType::Sale, first.id, 4, 1.0, None).await?;

        // Moving the sale to the second product reconciles both sides
        let updated = update_transaction(
            &db,
            tx.id,
            TransactionType::Sale,
            second.id,
            4,
            1.0,
            None,
        )
        .await?;
        assert_eq!(updated.product_id, second.id);
        assert_eq!(updated.product_name, "Second Product");

        let first_after = crate::core::product::get_product_by_id(&db, first.id)
            .await?
            .unwrap();
        let second_after = crate::core::product::get_product_by_id(&db, second.id)
            .await?
            .unwrap();
        assert_eq!(first_after.stock, 10);
        assert_eq!(second_after.stock, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_restores_stock_and_removes_row() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 3.0, 8).await?;

        let tx =
            create_transaction(&db, TransactionType::Sale, product.id, 3, 3.0, None).await?;
        let mid = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(mid.stock, 5);

        delete_transaction(&db, tx.id).await?;

        let after = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 8);
        assert!(get_transaction_by_id(&db, tx.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reversal_clamps_at_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 3.0, 0).await?;

        // Purchase of 5 brings stock to 5; drift pushes it back down to 3
        let tx = create_transaction(&db, TransactionType::Purchase, product.id, 5, 3.0, None)
            .await?;
        crate::core::product::set_stock(&db, product.id, 3).await?;

        // Reversal would be 3 - 5 = -2; persisted value is clamped at 0
        delete_transaction(&db, tx.id).await?;

        let after = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_with_missing_product_still_deletes() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Doomed Product", 3.0, 5).await?;

        let tx =
            create_transaction(&db, TransactionType::Sale, product.id, 2, 3.0, None).await?;
        crate::core::product::delete_product(&db, product.id).await?;

        // Deletion proceeds without a stock reversal
        delete_transaction(&db, tx.id).await?;
        assert!(get_transaction_by_id(&db, tx.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_transaction(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::TransactionNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Test Product", 1.0, 100).await?;

        let first =
            create_transaction(&db, TransactionType::Sale, product.id, 1, 1.0, None).await?;
        delete_transaction(&db, first.id).await?;

        let second =
            create_transaction(&db, TransactionType::Sale, product.id, 1, 1.0, None).await?;
        assert!(second.id > first.id);

        Ok(())
    }
}
