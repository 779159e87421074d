//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    ///
    /// This command provides users with information about all available bot commands
    /// and their usage, helping them understand the bot's capabilities.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**StockBuddy Help**\n\
        Here is a summary of all available commands for StockBuddy.\n\n\
        **Action Commands**\n\
        • `/purchase <product> <quantity> [unit_price] [details]` - Records incoming stock.\n\
        • `/sale <product> <quantity> [unit_price] [details]` - Records a sale, reducing stock.\n\
        • `/edit_transaction <id> <type> <product> <quantity> <unit_price> [details]` - Edits a recorded transaction.\n\
        • `/delete_transaction <id>` - Deletes a transaction and reverts its stock effect.\n\n\
        **Query Commands**\n\
        • `/transactions [filters...]` - Browses the ledger with filter, sort, and paging options.\n\
        • `/report <product>` - Shows stock and revenue summary for a product.\n\n\
        **Management Commands**\n\
        • `/product_manage <subcommand>` - Manage the catalog (add, list, update, delete).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
