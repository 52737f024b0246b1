//! Print logs - append-only records of filament consumption.

use crate::core::spool::SpoolId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One consumption event against a spool.
///
/// `spool_id` is a lookup key, not ownership: the spool may since have been
/// removed, in which case the log simply refers to an unknown spool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintLog {
    /// Unique identifier, immutable
    pub id: Uuid,
    /// Spool the filament came from
    pub spool_id: SpoolId,
    /// Print or project name
    pub print_name: String,
    /// Filament consumed, in grams
    pub weight_used: f64,
    /// When the print was logged
    pub timestamp: DateTime<Utc>,
}

/// Input for logging a print
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrintLog {
    /// Spool the filament came from
    pub spool_id: SpoolId,
    /// Print or project name
    pub print_name: String,
    /// Filament consumed, in grams
    pub weight_used: f64,
}

impl PrintLog {
    /// Stamps a new log with a fresh id and the current time.
    #[must_use]
    pub fn record(input: NewPrintLog) -> Self {
        Self {
            id: Uuid::new_v4(),
            spool_id: input.spool_id,
            print_name: input.print_name,
            weight_used: input.weight_used,
            timestamp: Utc::now(),
        }
    }
}
