//! Usage Discord commands - `log_print` and `history`.
//!
//! `log_print` is the usage form: it checks the input against the selected
//! spool before handing it to the ledger, which deducts the filament and
//! records the print in one step.

use crate::core::{LogEntry, stats::format_grams};

/// Prints shown per history page
pub const HISTORY_PAGE_SIZE: usize = 15;

/// One history line: print name, spool (or "Unknown spool"), grams, date.
#[must_use]
pub fn format_log_line(entry: &LogEntry<'_>) -> String {
    let spool_label = entry
        .spool
        .map_or_else(|| "Unknown spool".to_string(), crate::core::Spool::label);
    format!(
        "**{}** · {} · -{} · {}",
        entry.log.print_name,
        spool_label,
        format_grams(entry.log.weight_used),
        entry.log.timestamp.format("%Y-%m-%d")
    )
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{HISTORY_PAGE_SIZE, format_log_line};
    use crate::{
        bot::{
            Context,
            commands::{EMBED_DESCRIPTION_LIMIT, join_lines_within},
            handlers::autocomplete,
        },
        core::{NewPrintLog, SpoolLookup, stats::format_grams, validation},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Logs a finished print and deducts the filament it used from the spool.
    #[poise::command(slash_command, prefix_command)]
    pub async fn log_print(
        ctx: Context<'_>,
        #[description = "Spool the print used"]
        #[autocomplete = "autocomplete::autocomplete_selectable_spool"]
        #[max_length = 100]
        spool: String,
        #[description = "Name of the print or project"]
        #[max_length = 100]
        print_name: String,
        #[description = "Filament used, in grams"] weight_used: f64,
    ) -> Result<()> {
        let mut ledger = ctx.data().ledger.lock().await;

        let selected = match ledger.find_spool(&spool) {
            SpoolLookup::Found(found) => found.clone(),
            SpoolLookup::NotFound => {
                ctx.say(format!(
                    "❌ Spool '{spool}' not found. Use `/inventory` to see your spools."
                ))
                .await?;
                return Ok(());
            }
            SpoolLookup::Ambiguous => {
                ctx.say(format!(
                    "❌ '{spool}' matches more than one spool. Pick one from the suggestions."
                ))
                .await?;
                return Ok(());
            }
        };

        if let Err(problem) = validation::validate_print_usage(&selected, &print_name, weight_used)
        {
            ctx.say(format!("❌ Cannot log print: {problem}")).await?;
            return Ok(());
        }

        let log = ledger
            .log_print(NewPrintLog {
                spool_id: selected.id,
                print_name: print_name.trim().to_string(),
                weight_used,
            })
            .await?;
        let remaining = ledger
            .spool(selected.id)
            .map_or(0.0, |spool| spool.current_weight);
        drop(ledger);

        let mut reply = format!(
            "✅ Logged **{}**: -{} from {} ({} left)",
            log.print_name,
            format_grams(log.weight_used),
            selected.label(),
            format_grams(remaining)
        );
        if remaining <= 0.0 {
            reply.push_str("\n🪫 That spool is now empty.");
        } else if remaining < ctx.data().config.inventory.low_stock_threshold {
            reply.push_str("\n⚠️ That spool is running low.");
        }
        ctx.say(reply).await?;
        Ok(())
    }

    /// Shows the full print history, most recent first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(
        ctx: Context<'_>,
        #[description = "Page number (starts at 1)"] page: Option<u32>,
    ) -> Result<()> {
        let ledger = ctx.data().ledger.lock().await;
        let history = ledger.history();

        if history.is_empty() {
            ctx.say("📜 Your print history will appear here once you log a print with `/log_print`.")
                .await?;
            return Ok(());
        }

        let pages = history.len().div_ceil(HISTORY_PAGE_SIZE);
        let page = page
            .and_then(|p| usize::try_from(p).ok())
            .unwrap_or(1)
            .clamp(1, pages);

        let description = join_lines_within(
            history
                .iter()
                .skip((page - 1) * HISTORY_PAGE_SIZE)
                .take(HISTORY_PAGE_SIZE)
                .map(format_log_line),
            EMBED_DESCRIPTION_LIMIT,
        );
        let total = history.len();
        drop(history);
        drop(ledger);

        let embed = serenity::CreateEmbed::default()
            .title("📜 Print History")
            .description(description)
            .color(0x0063_66F1)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Page {page}/{pages} | {total} print{}",
                if total == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
