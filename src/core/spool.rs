//! Spool records - one purchased unit of filament.
//!
//! A spool's identity, material attributes, initial weight and purchase date
//! are fixed when it is registered. Only `current_weight` and `status` ever
//! change afterwards, and only through [`Spool::deduct`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a spool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpoolId(Uuid);

impl SpoolId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, as shown in listings.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for SpoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SpoolId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SpoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a spool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoolStatus {
    /// In use, with (possibly) remaining stock
    Active,
    /// Weight reached zero; never reverted
    Empty,
    /// Retired by hand; no operation produces this
    Archived,
}

impl SpoolStatus {
    /// Lowercase label, as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Empty => "empty",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SpoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filament spool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spool {
    /// Unique identifier, immutable
    pub id: SpoolId,
    /// Material tag (e.g., "PLA", "PETG")
    #[serde(rename = "type")]
    pub material: String,
    /// Color name (e.g., "Galaxy Black")
    pub color: String,
    /// Color swatch as a hex string (e.g., "#6366f1")
    pub color_hex: String,
    /// Manufacturer
    pub brand: String,
    /// Weight at purchase, in grams
    pub initial_weight: f64,
    /// Remaining weight, in grams
    pub current_weight: f64,
    /// When the spool was registered
    pub purchase_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: SpoolStatus,
}

/// Input for registering a new spool
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpool {
    /// Material tag
    pub material: String,
    /// Color name
    pub color: String,
    /// Color swatch
    pub color_hex: String,
    /// Manufacturer
    pub brand: String,
    /// Weight at purchase, in grams
    pub initial_weight: f64,
}

impl Spool {
    /// Builds a freshly purchased spool: full weight, active, dated now.
    #[must_use]
    pub fn register(input: NewSpool) -> Self {
        Self {
            id: SpoolId::new(),
            material: input.material,
            color: input.color,
            color_hex: input.color_hex,
            brand: input.brand,
            initial_weight: input.initial_weight,
            current_weight: input.initial_weight,
            purchase_date: Utc::now(),
            status: SpoolStatus::Active,
        }
    }

    /// Deducts consumed filament, clamping at zero.
    ///
    /// Reaching zero marks the spool empty. Any other result leaves the
    /// status alone, so an empty or archived spool is never reactivated.
    pub fn deduct(&mut self, weight_used: f64) {
        let new_weight = (self.current_weight - weight_used).max(0.0);
        self.current_weight = new_weight;
        if new_weight <= 0.0 {
            self.status = SpoolStatus::Empty;
        }
    }

    /// Whether this spool counts as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SpoolStatus::Active
    }

    /// Active and holding some filament; the spools a print can be logged against.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.is_active() && self.current_weight > 0.0
    }

    /// Active and strictly below `threshold` grams.
    #[must_use]
    pub fn is_low_stock(&self, threshold: f64) -> bool {
        self.is_active() && self.current_weight < threshold
    }

    /// Remaining share of the initial weight, 0-100.
    #[must_use]
    pub fn fill_percent(&self) -> f64 {
        if self.initial_weight <= 0.0 {
            return 0.0;
        }
        (self.current_weight / self.initial_weight * 100.0).clamp(0.0, 100.0)
    }

    /// "Brand Color" display name.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.color)
    }
}
