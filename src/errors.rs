//! Unified error types for `StockBuddy`.
//!
//! Business failures (unknown products, insufficient stock, bad input) are
//! modeled as explicit variants so callers can match on them and report
//! structured results. Infrastructure faults (database, I/O, Discord) are
//! wrapped via `#[from]` conversions and treated as a separate channel.

use thiserror::Error;

/// All errors that can occur within the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A transaction type token other than `"Purchase"` or `"Sale"` was supplied
    #[error("Invalid transaction type: '{value}' (must be 'Purchase' or 'Sale')")]
    InvalidTransactionType {
        /// The rejected token
        value: String,
    },

    /// The referenced product does not exist or has been deleted
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Product name or id used in the lookup
        name: String,
    },

    /// The referenced transaction does not exist
    #[error("Transaction not found: {id}")]
    TransactionNotFound {
        /// Transaction id used in the lookup
        id: i64,
    },

    /// A sale would drive the product's stock below zero
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        /// Units currently available
        available: i64,
        /// Units the sale asked for
        requested: i64,
    },

    /// The stock write was rejected by the store (e.g. product vanished mid-mutation)
    #[error("Stock update failed for product {product_id}")]
    StockUpdateFailed {
        /// Product whose stock write failed
        product_id: i64,
    },

    /// A non-positive quantity was supplied
    #[error("Invalid quantity: {quantity} (must be a positive number of units)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A negative or non-finite price was supplied
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer conversion error
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
