//! Application settings loaded from config.toml
//!
//! Every field has a default, so the file is optional. The defaults mirror
//! the inventory form and dashboard behaviour: a 200 g low-stock threshold,
//! the five most recent prints, and a 1000 g PLA spool as the starting point
//! for new purchases.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "SPOOL_BUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inventory and dashboard behaviour
    pub inventory: InventoryConfig,
    /// Storage key names
    pub storage: StorageConfig,
}

/// Inventory and dashboard settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Active spools strictly below this many grams count as low stock
    pub low_stock_threshold: f64,
    /// Number of prints shown on the dashboard
    pub recent_prints: usize,
    /// Swatch used when a new spool is added without one
    pub default_color_hex: String,
    /// Weight used when a new spool is added without one
    pub default_spool_weight: f64,
    /// Material tags offered by autocomplete
    pub materials: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: crate::core::stats::LOW_STOCK_THRESHOLD_GRAMS,
            recent_prints: 5,
            default_color_hex: "#6366f1".to_string(),
            default_spool_weight: 1000.0,
            materials: ["PLA", "PETG", "ABS", "TPU", "ASA", "Nylon"]
                .iter()
                .map(|&m| m.to_string())
                .collect(),
        }
    }
}

/// Names of the two storage namespaces
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key holding the spool collection
    pub spools_key: String,
    /// Key holding the print log sequence
    pub logs_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            spools_key: "filament_spools".to_string(),
            logs_key: "filament_logs".to_string(),
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `$SPOOL_BUDDY_CONFIG` or `./config.toml`.
///
/// A missing file yields the defaults; an unreadable or malformed file is an error.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        info!("No config file at {path}, using defaults");
        Ok(Config::default())
    }
}
