//! Dashboard aggregates and display helpers.
//!
//! Everything here is a pure function over the ledger's current records, so
//! repeated calls without an intervening mutation give identical results.
//! Nothing computed here is persisted.

use crate::core::{print_log::PrintLog, spool::Spool};

/// Active spools strictly below this many grams are flagged as low stock.
pub const LOW_STOCK_THRESHOLD_GRAMS: f64 = 200.0;

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryStats {
    /// Sum of remaining weight over all spools
    pub inventory_grams: f64,
    /// Sum of weight used over all print logs
    pub used_grams: f64,
    /// Number of active spools
    pub active_spools: usize,
    /// Number of active spools below the low-stock threshold
    pub low_stock_count: usize,
}

/// Remaining weight of one material across all spools
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTotal {
    /// Material tag
    pub material: String,
    /// Summed remaining weight in grams
    pub grams: f64,
}

/// Total remaining weight over all spools.
#[must_use]
pub fn total_inventory_weight(spools: &[Spool]) -> f64 {
    spools.iter().map(|spool| spool.current_weight).sum()
}

/// Total weight consumed over all print logs.
#[must_use]
pub fn total_consumed_weight(logs: &[PrintLog]) -> f64 {
    logs.iter().map(|log| log.weight_used).sum()
}

/// Number of spools with active status.
#[must_use]
pub fn active_spool_count(spools: &[Spool]) -> usize {
    spools.iter().filter(|spool| spool.is_active()).count()
}

/// Number of active spools strictly below `threshold` grams.
#[must_use]
pub fn low_stock_count(spools: &[Spool], threshold: f64) -> usize {
    spools
        .iter()
        .filter(|spool| spool.is_low_stock(threshold))
        .count()
}

/// Remaining weight grouped by material, in order of first appearance.
#[must_use]
pub fn weight_by_material(spools: &[Spool]) -> Vec<MaterialTotal> {
    let mut totals: Vec<MaterialTotal> = Vec::new();
    for spool in spools {
        match totals.iter_mut().find(|t| t.material == spool.material) {
            Some(total) => total.grams += spool.current_weight,
            None => totals.push(MaterialTotal {
                material: spool.material.clone(),
                grams: spool.current_weight,
            }),
        }
    }
    totals
}

/// The first `limit` logs; the sequence is already most recent first.
#[must_use]
pub fn recent_print_logs(logs: &[PrintLog], limit: usize) -> &[PrintLog] {
    &logs[..limit.min(logs.len())]
}

/// Computes the dashboard headline figures.
#[must_use]
pub fn inventory_stats(spools: &[Spool], logs: &[PrintLog], low_stock_threshold: f64) -> InventoryStats {
    InventoryStats {
        inventory_grams: total_inventory_weight(spools),
        used_grams: total_consumed_weight(logs),
        active_spools: active_spool_count(spools),
        low_stock_count: low_stock_count(spools, low_stock_threshold),
    }
}

/// Formats a weight as whole grams, or kilograms from 1000 g up.
#[must_use]
pub fn format_grams(grams: f64) -> String {
    if grams.abs() >= 1000.0 {
        format!("{:.2}kg", grams / 1000.0)
    } else {
        format!("{grams:.0}g")
    }
}

/// Text fill bar for a spool card, like `[██████░░░░] 60%`.
#[must_use]
pub fn format_fill_bar(fill_percent: f64, bar_length: usize) -> String {
    let clamped = fill_percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and bar_length is small, so the cast cannot overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * bar_length as f64).round() as usize;
    let empty = bar_length.saturating_sub(filled);

    format!("[{}{}] {clamped:.0}%", "█".repeat(filled), "░".repeat(empty))
}
