//! Autocomplete handlers for Discord slash command parameters.
//!
//! Spool parameters are completed with `"<short id> <label>"` strings. The
//! commands resolve them through [`Ledger::find_spool`], which only looks at
//! the leading id token.
//!
//! [`Ledger::find_spool`]: crate::core::Ledger::find_spool

use crate::{
    bot::Context,
    core::{Spool, stats::format_grams},
};

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

/// Autocomplete entry for a spool, e.g. `"1a2b3c4d PLA · Prusament Galaxy Black (734g)"`.
#[must_use]
pub fn spool_choice(spool: &Spool) -> String {
    format!(
        "{} {} · {} ({})",
        spool.id.short(),
        spool.material,
        spool.label(),
        format_grams(spool.current_weight)
    )
}

fn matches_partial(spool: &Spool, partial_lower: &str) -> bool {
    spool_choice(spool).to_lowercase().contains(partial_lower)
}

/// Suggests spools a print can be logged against (active, with filament left).
pub async fn autocomplete_selectable_spool(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let ledger = ctx.data().ledger.lock().await;
    let partial_lower = partial.to_lowercase();

    ledger
        .selectable_spools()
        .filter(|spool| matches_partial(spool, &partial_lower))
        .map(spool_choice)
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests any spool in the inventory, whatever its status.
pub async fn autocomplete_any_spool(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let ledger = ctx.data().ledger.lock().await;
    let partial_lower = partial.to_lowercase();

    ledger
        .spools()
        .iter()
        .filter(|spool| matches_partial(spool, &partial_lower))
        .map(spool_choice)
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests material tags from the config, plus any already in the inventory.
pub async fn autocomplete_material(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let ledger = ctx.data().ledger.lock().await;
    let partial_lower = partial.to_lowercase();

    let mut materials: Vec<String> = ctx.data().config.inventory.materials.clone();
    for spool in ledger.spools() {
        if !materials.contains(&spool.material) {
            materials.push(spool.material.clone());
        }
    }

    materials
        .into_iter()
        .filter(|material| material.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}
