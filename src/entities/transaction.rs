//! Transaction entity - Represents the inventory transaction ledger.
//!
//! Each transaction records a purchase or sale against a product, together with
//! a denormalized `product_name` snapshot taken at transaction time. The
//! snapshot is never re-derived from the live product, so history stays stable
//! even if the product is later renamed or deleted. `id` and `transaction_date`
//! are immutable once the row is created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wire token of the transaction type: `"Purchase"` or `"Sale"`
    pub transaction_type: String,
    /// ID of the product this transaction affects
    pub product_id: i64,
    /// Snapshot of the product name at transaction time
    pub product_name: String,
    /// Number of units bought or sold (always positive)
    pub quantity: i64,
    /// Price per unit in dollars
    pub unit_price: f64,
    /// Stored derived total: `quantity * unit_price`
    pub total_price: f64,
    /// Optional free-form note about the transaction
    pub details: Option<String>,
    /// When the transaction was created; immutable thereafter
    pub transaction_date: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
