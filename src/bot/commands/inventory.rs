//! Inventory Discord commands - list, add, and remove spools.
//!
//! `add_spool` is the new-purchase form and `remove_spool` the delete button:
//! both validate or confirm in this layer and then call straight into the ledger.

use super::{EMBED_FIELD_NAME_LIMIT, EMBED_FIELD_VALUE_LIMIT, truncate_text};
use crate::core::{
    Spool, SpoolStatus,
    stats::{format_fill_bar, format_grams},
};

/// Discord's limit on fields per embed
const MAX_EMBED_FIELDS: usize = 25;

/// Room kept for the inventory embed's own title, description, and footer
const EMBED_CHROME_RESERVE: usize = 200;

/// Embed field for one spool card: (title, body), each within Discord's limits.
#[must_use]
pub fn spool_card(spool: &Spool, low_stock_threshold: f64) -> (String, String) {
    let title = format!(
        "{} {} · {}",
        status_icon(spool, low_stock_threshold),
        spool.material,
        spool.label()
    );
    let body = format!(
        "{} / {}\n{}\n`{}` · {} · {} · since {}",
        format_grams(spool.current_weight),
        format_grams(spool.initial_weight),
        format_fill_bar(spool.fill_percent(), 10),
        spool.id.short(),
        spool.color_hex,
        spool.status,
        spool.purchase_date.format("%Y-%m-%d")
    );
    (
        truncate_text(&title, EMBED_FIELD_NAME_LIMIT),
        truncate_text(&body, EMBED_FIELD_VALUE_LIMIT),
    )
}

/// Cards for as many spools as fit in one embed, in inventory order.
#[must_use]
pub fn spool_cards(spools: &[Spool], low_stock_threshold: f64) -> Vec<(String, String)> {
    let budget = super::EMBED_TOTAL_LIMIT - EMBED_CHROME_RESERVE;
    let mut used = 0;
    let mut cards = Vec::new();
    for spool in spools.iter().take(MAX_EMBED_FIELDS) {
        let (title, body) = spool_card(spool, low_stock_threshold);
        let length = title.chars().count() + body.chars().count();
        if used + length > budget {
            break;
        }
        used += length;
        cards.push((title, body));
    }
    cards
}

const fn status_icon_for(status: SpoolStatus, low: bool) -> &'static str {
    match status {
        SpoolStatus::Active if low => "🟡",
        SpoolStatus::Active => "🟢",
        SpoolStatus::Empty => "⚫",
        SpoolStatus::Archived => "📦",
    }
}

fn status_icon(spool: &Spool, low_stock_threshold: f64) -> &'static str {
    status_icon_for(spool.status, spool.is_low_stock(low_stock_threshold))
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::spool_cards;
    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{NewSpool, SpoolLookup, stats::format_grams, validation},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Lists every spool with its remaining weight and status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn inventory(ctx: Context<'_>) -> Result<()> {
        let threshold = ctx.data().config.inventory.low_stock_threshold;
        let ledger = ctx.data().ledger.lock().await;

        if ledger.spools().is_empty() {
            ctx.say("🧵 No spools yet. Add your first one with `/add_spool`.")
                .await?;
            return Ok(());
        }

        let total = ledger.spools().len();
        let fields: Vec<(String, String, bool)> = spool_cards(ledger.spools(), threshold)
            .into_iter()
            .map(|(title, body)| (title, body, true))
            .collect();
        drop(ledger);

        let shown = fields.len();
        let footer = if total > shown {
            format!("Showing {shown} of {total} spools")
        } else {
            format!("{total} spool{}", if total == 1 { "" } else { "s" })
        };

        let embed = serenity::CreateEmbed::default()
            .title("🧵 Inventory")
            .description("Your filament stock and remaining levels.")
            .color(0x0063_66F1)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(footer));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Registers a newly purchased spool.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_spool(
        ctx: Context<'_>,
        #[description = "Material type (PLA, PETG, ...)"]
        #[autocomplete = "autocomplete::autocomplete_material"]
        #[max_length = 32]
        material: String,
        #[description = "Color name"]
        #[max_length = 64]
        color: String,
        #[description = "Brand"]
        #[max_length = 64]
        brand: String,
        #[description = "Spool weight in grams (default 1000)"] weight: Option<f64>,
        #[description = "Color swatch as #rrggbb"]
        #[max_length = 7]
        color_hex: Option<String>,
    ) -> Result<()> {
        let settings = &ctx.data().config.inventory;
        let weight = weight.unwrap_or(settings.default_spool_weight);
        let color_hex = color_hex.unwrap_or_else(|| settings.default_color_hex.clone());

        if let Err(problem) =
            validation::validate_new_spool(&material, &color, &color_hex, &brand, weight)
        {
            ctx.say(format!("❌ Cannot add spool: {problem}")).await?;
            return Ok(());
        }

        let spool = ctx
            .data()
            .ledger
            .lock()
            .await
            .register_spool(NewSpool {
                material: material.trim().to_string(),
                color: color.trim().to_string(),
                color_hex: color_hex.to_lowercase(),
                brand: brand.trim().to_string(),
                initial_weight: weight,
            })
            .await?;

        ctx.say(format!(
            "✅ Added {} {} ({}) · id `{}`",
            spool.material,
            spool.label(),
            format_grams(spool.initial_weight),
            spool.id.short()
        ))
        .await?;
        Ok(())
    }

    /// Removes a spool from the inventory. Its print history is kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn remove_spool(
        ctx: Context<'_>,
        #[description = "Spool to remove"]
        #[autocomplete = "autocomplete::autocomplete_any_spool"]
        #[max_length = 100]
        spool: String,
        #[description = "Confirm the removal"] confirm: bool,
    ) -> Result<()> {
        let mut ledger = ctx.data().ledger.lock().await;

        let (spool_id, label) = match ledger.find_spool(&spool) {
            SpoolLookup::Found(found) => (found.id, found.label()),
            SpoolLookup::NotFound => {
                ctx.say(format!("❌ Spool '{spool}' not found.")).await?;
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

        if !confirm {
            ctx.say(format!(
                "⚠️ Are you sure you want to remove {label}? Its print history will not be deleted. \
                 Run the command again with `confirm: True` to proceed."
            ))
            .await?;
            return Ok(());
        }

        ledger.remove_spool(spool_id).await?;
        drop(ledger);

        ctx.say(format!("🗑️ Removed {label}. Its print history was kept."))
            .await?;
        Ok(())
    }
}

pub use inner::*;
