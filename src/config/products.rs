//! Product catalog seeding from config.toml
//!
//! This module provides functionality to load an initial product catalog from
//! a TOML configuration file. The products defined in config.toml are used to
//! seed the database on first run or when products are missing; live stock
//! levels are never overwritten by re-seeding.

use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of product configurations to seed
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Name of the product
    pub name: String,
    /// Default unit price in dollars
    pub price: f64,
    /// Opening stock level in units
    #[serde(default)]
    pub stock: i64,
}

/// Loads the product catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the catalog configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds the database with any configured product that does not exist yet.
///
/// Products are matched by name; existing products are left untouched so the
/// reconciled stock level survives restarts. Returns the number of products
/// inserted.
pub async fn seed_initial_products(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut inserted = 0;

    for entry in &config.products {
        if crate::core::product::get_product_by_name(db, entry.name.trim())
            .await?
            .is_none()
        {
            crate::core::product::create_product(
                db,
                entry.name.clone(),
                entry.price,
                entry.stock,
            )
            .await?;
            inserted += 1;
        }
    }

    if inserted > 0 {
        info!(inserted, "Seeded products from config.toml");
    }

    Ok(inserted)
}
