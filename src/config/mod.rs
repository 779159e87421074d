/// Database configuration and connection management
pub mod database;

/// Product catalog seeding from config.toml
pub mod products;
