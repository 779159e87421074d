//! Product entity - Represents the catalog items that stock is tracked against.
//!
//! Each product has a unique name, a default unit price, and an authoritative
//! stock level that the reconciliation engine keeps consistent with the
//! transaction ledger. Products are soft-deleted so historical transactions
//! keep pointing at a stable row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Blue Widget")
    #[sea_orm(unique)]
    pub name: String,
    /// Default unit price in dollars, used when a transaction omits one
    pub price: f64,
    /// Current stock level in units; never driven negative by a sale
    pub stock: i64,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
