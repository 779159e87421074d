//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! product names, improving the user experience by suggesting valid options as
//! the user types.

use crate::{bot::BotData, core::product, errors::Error};

/// Provides autocomplete suggestions for product names.
///
/// This function queries the database for active products that match the user's
/// partial input and returns up to 25 matching product names.
///
/// # Arguments
/// * `ctx` - The poise context containing the database connection
/// * `partial` - The partial string the user has typed so far
///
/// # Returns
/// A vector of product names that match the partial input
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    // Get all active products
    let Ok(products) = product::get_all_active_products(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();

    // Filter products where name matches the partial input
    // Return just the name so it matches command parameters exactly
    let mut matching: Vec<String> = products
        .into_iter()
        .filter(|prod| prod.name.to_lowercase().contains(&partial_lower))
        .map(|prod| prod.name)
        .take(25) // Discord autocomplete limit
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching
}
