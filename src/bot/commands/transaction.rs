//! Transaction Discord commands - `purchase`, `sale`, `transactions`,
//! `edit_transaction`, and `delete_transaction`.
//!
//! This module contains commands that interact with the database through our
//! core modules to record inventory movements and browse the ledger. Typed
//! business failures from the core are rendered as user-facing replies;
//! infrastructure errors propagate to the central error handler.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            product,
            query::{self, SortBy, SortDirection, TransactionFilter},
            transaction::{self, TransactionType},
        },
        errors::{Error, Result},
    };

    /// Records one ledger mutation and reports the outcome, shared by
    /// `/purchase` and `/sale`.
    async fn record(
        ctx: poise::Context<'_, BotData, Error>,
        transaction_type: TransactionType,
        product_name: &str,
        quantity: i64,
        unit_price: Option<f64>,
        details: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(product_row) = product::get_product_by_name(db, product_name).await? else {
            ctx.say(&format!(
                "❌ Product '{product_name}' not found. Use `/product_manage list` to see the catalog.",
            ))
            .await?;
            return Ok(());
        };

        // Fall back to the product's configured unit price
        let price = unit_price.unwrap_or(product_row.price);

        match transaction::create_transaction(
            db,
            transaction_type,
            product_row.id,
            quantity,
            price,
            details,
        )
        .await
        {
            Ok(tx) => {
                let new_stock = product_row.stock + transaction_type.effect(quantity);
                ctx.say(&format!(
                    "✅ {} recorded: {} ×{} @ ${:.2} = ${:.2} (Transaction ID: {}). Stock is now {}.",
                    transaction_type, tx.product_name, tx.quantity, tx.unit_price, tx.total_price,
                    tx.id, new_stock
                ))
                .await?;
            }
            Err(Error::InsufficientStock {
                available,
                requested,
            }) => {
                ctx.say(&format!(
                    "❌ Insufficient stock for '{product_name}': {available} available, {requested} requested.",
                ))
                .await?;
            }
            Err(
                e @ (Error::InvalidQuantity { .. }
                | Error::InvalidPrice { .. }
                | Error::ProductNotFound { .. }
                | Error::StockUpdateFailed { .. }),
            ) => {
                ctx.say(&format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Records incoming stock for a product.
    ///
    /// Adds the quantity to the product's stock level and appends a Purchase
    /// entry to the transaction ledger. The unit price defaults to the
    /// product's configured price when omitted.
    #[poise::command(slash_command, prefix_command)]
    pub async fn purchase(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product the stock arrives for"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "Number of units purchased"] quantity: i64,
        #[description = "Price paid per unit. Defaults to the product's price."] unit_price: Option<
            f64,
        >,
        #[description = "Optional note (supplier, invoice number, ...)"] details: Option<String>,
    ) -> Result<()> {
        record(
            ctx,
            TransactionType::Purchase,
            &product,
            quantity,
            unit_price,
            details,
        )
        .await
    }

    /// Records a sale of a product.
    ///
    /// Removes the quantity from the product's stock level and appends a Sale
    /// entry to the transaction ledger. Fails without side effects if the
    /// product does not hold enough stock.
    #[poise::command(slash_command, prefix_command)]
    pub async fn sale(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product being sold"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "Number of units sold"] quantity: i64,
        #[description = "Price charged per unit. Defaults to the product's price."]
        unit_price: Option<f64>,
        #[description = "Optional note about the sale"] details: Option<String>,
    ) -> Result<()> {
        record(
            ctx,
            TransactionType::Sale,
            &product,
            quantity,
            unit_price,
            details,
        )
        .await
    }

    /// Browses the transaction ledger with filters, sorting, and paging.
    ///
    /// All filters combine with AND. An unrecognized sort key falls back to
    /// date-descending. Pages are 1-indexed and sized 10 by default.
    #[poise::command(slash_command, prefix_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn transactions(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show transactions for this product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: Option<String>,
        #[description = "Only show 'Purchase' or 'Sale' entries"] transaction_type: Option<String>,
        #[description = "Substring to search in product names and details"] search: Option<String>,
        #[description = "Sort key: date, product, type, or total"] sort_by: Option<String>,
        #[description = "Sort direction: asc or desc"] direction: Option<String>,
        #[description = "Page number (1-indexed)"] page: Option<i64>,
        #[description = "Entries per page (max 100, default 10)"] page_size: Option<i64>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let mut filter = TransactionFilter::default();

        if let Some(name) = &product {
            let Some(product_row) = product::get_product_by_name(db, name).await? else {
                ctx.say(&format!("❌ Product '{name}' not found.")).await?;
                return Ok(());
            };
            filter.product_id = Some(product_row.id);
        }

        if let Some(token) = &transaction_type {
            match TransactionType::parse(token) {
                Ok(parsed) => filter.transaction_type = Some(parsed),
                Err(e) => {
                    ctx.say(&format!("❌ {e}")).await?;
                    return Ok(());
                }
            }
        }

        filter.search = search;

        // Unrecognized or missing sort key falls back to date-descending
        match sort_by.as_deref().and_then(SortBy::parse) {
            Some(key) => {
                filter.sort_by = key;
                filter.sort_direction = direction
                    .as_deref()
                    .map_or(SortDirection::Desc, SortDirection::parse);
            }
            None => {
                filter.sort_by = SortBy::Date;
                filter.sort_direction = SortDirection::Desc;
            }
        }

        // Boundary-side clamping; the engine takes page/page_size as given
        let page = u64::try_from(page.unwrap_or(1).max(1))?;
        let page_size = u64::try_from(page_size.unwrap_or(10).clamp(1, 100))?;

        let result = query::query_transactions(db, &filter, page, page_size).await?;

        if result.items.is_empty() {
            ctx.say(&format!(
                "No transactions on page {page} ({} matching in total).",
                result.total_count
            ))
            .await?;
            return Ok(());
        }

        let total_pages = result.total_count.div_ceil(page_size).max(1);
        let mut lines = vec![format!(
            "**Transactions** - page {page}/{total_pages} ({} matching)",
            result.total_count
        )];

        for tx in &result.items {
            let mut line = format!(
                "`#{}` {} - {} ×{} @ ${:.2} = ${:.2} ({})",
                tx.id,
                tx.transaction_type,
                tx.product_name,
                tx.quantity,
                tx.unit_price,
                tx.total_price,
                tx.transaction_date.format("%Y-%m-%d"),
            );
            if let Some(details) = &tx.details {
                line.push_str(&format!(" - {details}"));
            }
            lines.push(line);
        }

        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Edits a recorded transaction and reconciles stock accordingly.
    ///
    /// Every mutable field is replaced; the transaction keeps its id and
    /// original date. Stock lands exactly where a fresh recording with the new
    /// values would have put it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn edit_transaction(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "ID of the transaction to edit"] id: i64,
        #[description = "New type: 'Purchase' or 'Sale'"] transaction_type: String,
        #[description = "Product the transaction applies to"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "New number of units"] quantity: i64,
        #[description = "New price per unit"] unit_price: f64,
        #[description = "New note (replaces the old one)"] details: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let parsed_type = match TransactionType::parse(&transaction_type) {
            Ok(parsed) => parsed,
            Err(e) => {
                ctx.say(&format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let Some(product_row) = product::get_product_by_name(db, &product).await? else {
            ctx.say(&format!("❌ Product '{product}' not found.")).await?;
            return Ok(());
        };

        match transaction::update_transaction(
            db,
            id,
            parsed_type,
            product_row.id,
            quantity,
            unit_price,
            details,
        )
        .await
        {
            Ok(tx) => {
                ctx.say(&format!(
                    "✅ Transaction #{} updated: {} {} ×{} @ ${:.2} = ${:.2}.",
                    tx.id, tx.transaction_type, tx.product_name, tx.quantity, tx.unit_price,
                    tx.total_price
                ))
                .await?;
            }
            Err(Error::TransactionNotFound { id }) => {
                ctx.say(&format!("❌ Transaction #{id} not found.")).await?;
            }
            Err(Error::InsufficientStock {
                available,
                requested,
            }) => {
                ctx.say(&format!(
                    "❌ Insufficient stock for this edit: {available} available, {requested} requested.",
                ))
                .await?;
            }
            Err(
                e @ (Error::InvalidQuantity { .. }
                | Error::InvalidPrice { .. }
                | Error::ProductNotFound { .. }
                | Error::StockUpdateFailed { .. }
                | Error::InvalidTransactionType { .. }),
            ) => {
                ctx.say(&format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Deletes a transaction and reverts its stock effect.
    ///
    /// The reversal is clamped at zero stock and skipped when the product no
    /// longer exists; the ledger entry is removed either way.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_transaction(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "ID of the transaction to delete"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        match transaction::delete_transaction(db, id).await {
            Ok(()) => {
                ctx.say(&format!(
                    "✅ Transaction #{id} deleted and its stock effect reverted.",
                ))
                .await?;
            }
            Err(Error::TransactionNotFound { id }) => {
                ctx.say(&format!("❌ Transaction #{id} not found.")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
