//! Product Discord commands - `product_manage` and `report`.
//!
//! This module contains commands for managing the product catalog and for
//! summarizing a product's stock and revenue history.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{product, query, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing the product catalog.
    ///
    /// Groups subcommands for adding, listing, updating, and deleting products.
    /// Stock levels are never edited here directly; they only move through
    /// `/purchase`, `/sale`, and transaction edits.
    #[poise::command(
        slash_command,
        subcommands("product_add", "product_list", "product_update", "product_delete")
    )]
    pub async fn product_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product_manage add` - Add a new product\n\
            `/product_manage list` - List all products with stock levels\n\
            `/product_manage update` - Update a product's name or price\n\
            `/product_manage delete` - Delete a product (history is kept)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product to the catalog.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique name for the product (e.g., 'Blue Widget')"] name: String,
        #[description = "Default unit price in dollars (e.g., 4.25)"] price: f64,
        #[description = "Opening stock in units. Defaults to 0."] stock: Option<i64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let opening_stock = stock.unwrap_or(0);

        match product::create_product(db, name.clone(), price, opening_stock).await {
            Ok(created) => {
                ctx.say(&format!(
                    "✅ Product '{}' added with unit price **${:.2}** and {} units in stock.",
                    created.name, created.price, created.stock
                ))
                .await?;
            }
            Err(e @ Error::Database(_)) => {
                let err_msg = format!("{e:?}");
                if err_msg.contains("UNIQUE") || err_msg.contains("unique") {
                    ctx.say(&format!(
                        "⚠️ A product named '{name}' already exists. Product names must be unique.",
                    ))
                    .await?;
                } else {
                    ctx.say(&format!(
                        "❌ Failed to add product '{name}'. Please try again later.",
                    ))
                    .await?;
                    return Err(e);
                }
            }
            Err(
                e @ (Error::Config { .. }
                | Error::InvalidPrice { .. }
                | Error::InvalidQuantity { .. }),
            ) => {
                ctx.say(&format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Lists all catalog products with their prices and current stock levels.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let products = product::get_all_active_products(db).await?;

        if products.is_empty() {
            ctx.say("No products in the catalog yet. Use `/product_manage add` to create some!")
                .await?;
            return Ok(());
        }

        let mut embed_fields = Vec::new();
        for prod in products {
            let field_name = format!("{} (${:.2})", prod.name, prod.price);
            let field_value = format!("In stock: {} units", prod.stock);
            embed_fields.push((field_name, field_value, false));
        }

        let list_embed = serenity::CreateEmbed::default()
            .title("**Product Catalog**")
            .color(0x0058_65F2) // Discord purple
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Updates a product's name and/or default unit price.
    #[poise::command(slash_command, rename = "update")]
    pub async fn product_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to update"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "New default unit price"] price: f64,
        #[description = "New name. Keeps the current name if omitted."] new_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(product_row) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let target_name = new_name.unwrap_or_else(|| product_row.name.clone());

        match product::update_product(db, product_row.id, target_name, price).await {
            Ok(updated) => {
                ctx.say(&format!(
                    "✅ Product '{}' updated: unit price **${:.2}**.",
                    updated.name, updated.price
                ))
                .await?;
            }
            Err(e @ (Error::Config { .. } | Error::InvalidPrice { .. })) => {
                ctx.say(&format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Deletes a product from the catalog.
    ///
    /// The delete is soft: existing transactions keep their product-name
    /// snapshots and remain browsable, but no new transactions can target the
    /// product and leftover stock reversals are skipped.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(product_row) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let history = query::count_transactions_for_product(db, product_row.id).await?;
        product::delete_product(db, product_row.id).await?;

        ctx.say(&format!(
            "✅ Product '{name}' deleted. {history} historical transaction(s) keep their records.",
        ))
        .await?;

        Ok(())
    }

    /// Shows a stock and revenue summary for a product.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to report on"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(product_row) = product::get_product_by_name(db, &product).await? else {
            ctx.say(&format!("❌ Product '{product}' not found.")).await?;
            return Ok(());
        };

        let report = report::generate_product_report(db, product_row.id, Some(5)).await?;

        let mut lines = vec![
            format!("**{}** - ${:.2} per unit", report.product.name, report.product.price),
            format!("In stock: **{}** units", report.product.stock),
            format!(
                "Purchased: {} units (${:.2}) · Sold: {} units (${:.2})",
                report.units_purchased,
                report.purchase_total,
                report.units_sold,
                report.sales_total
            ),
        ];

        if !report.recent_transactions.is_empty() {
            lines.push("Recent transactions:".to_string());
            for tx in &report.recent_transactions {
                lines.push(format!(
                    "`#{}` {} ×{} = ${:.2} ({})",
                    tx.id,
                    tx.transaction_type,
                    tx.quantity,
                    tx.total_price,
                    tx.transaction_date.format("%Y-%m-%d"),
                ));
            }
        }

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
