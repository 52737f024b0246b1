//! General Discord commands - ping and help.
//! These commands don't touch the ledger.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**SpoolBuddy Help**\n\
        Track your filament spools and how much each print uses.\n\n\
        **Views**\n\
        • `/dashboard` - Totals, low-stock count, material breakdown, and recent prints.\n\
        • `/inventory` - Every spool with its remaining weight.\n\
        • `/history [page]` - Full print history, most recent first.\n\n\
        **Actions**\n\
        • `/add_spool <material> <color> <brand> [weight] [color_hex]` - Registers a new spool.\n\
        • `/log_print <spool> <print_name> <weight_used>` - Logs a print and deducts its filament.\n\
        • `/remove_spool <spool> <confirm>` - Removes a spool. Its print history is kept.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
