//! Core business logic, independent of the Discord boundary.
//!
//! Everything here works against an injected [`sea_orm::DatabaseConnection`]
//! and returns typed results; no module in `core` knows about poise or
//! serenity.

/// Product store operations - catalog lookups and stock writes
pub mod product;

/// Query engine - filtered, sorted, paginated views over the ledger
pub mod query;

/// Report generation over products and their transaction history
pub mod report;

/// Stock reconciliation engine - create/update/delete with stock deltas
pub mod transaction;
