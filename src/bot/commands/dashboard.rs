//! Dashboard Discord command - headline figures, material breakdown, and recent prints.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::{EMBED_FIELD_VALUE_LIMIT, join_lines_within, usage::format_log_line},
        },
        core::stats,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Shows inventory totals, low-stock count, material breakdown, and the latest prints.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: Context<'_>) -> Result<()> {
        let settings = &ctx.data().config.inventory;
        let ledger = ctx.data().ledger.lock().await;

        let summary = stats::inventory_stats(
            ledger.spools(),
            ledger.print_logs(),
            settings.low_stock_threshold,
        );

        let mut breakdown = join_lines_within(
            stats::weight_by_material(ledger.spools())
                .into_iter()
                .map(|total| {
                    format!(
                        "**{}:** {}",
                        total.material,
                        stats::format_grams(total.grams)
                    )
                }),
            EMBED_FIELD_VALUE_LIMIT,
        );
        if breakdown.is_empty() {
            breakdown.push_str("No spools yet. Add one with `/add_spool`.");
        }

        let mut recent = join_lines_within(
            ledger
                .recent_entries(settings.recent_prints)
                .iter()
                .map(format_log_line),
            EMBED_FIELD_VALUE_LIMIT,
        );
        if recent.is_empty() {
            recent.push_str("No prints logged yet.");
        }
        drop(ledger);

        let embed = serenity::CreateEmbed::default()
            .title("🧵 Filament Dashboard")
            .color(0x0063_66F1)
            .fields(vec![
                (
                    "Inventory",
                    stats::format_grams(summary.inventory_grams),
                    true,
                ),
                ("Used", stats::format_grams(summary.used_grams), true),
                (
                    "Active Spools",
                    summary.active_spools.to_string(),
                    true,
                ),
                (
                    "⚠️ Low Stock",
                    format!(
                        "{} (< {})",
                        summary.low_stock_count,
                        stats::format_grams(settings.low_stock_threshold)
                    ),
                    true,
                ),
            ])
            .field("By Material", breakdown, false)
            .field("Recent Prints", recent, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
