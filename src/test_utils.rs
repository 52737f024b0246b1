//! Shared test utilities for `SpoolBuddy`.
//!
//! Helpers for setting up test databases and ledgers and for creating spools
//! and print logs with sensible defaults.

use crate::{
    core::{Ledger, NewPrintLog, NewSpool, PrintLog, Spool, SpoolId},
    errors::{Error, Result},
    store::{MemoryStore, Store},
};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty ledger over a fresh in-memory store.
pub async fn setup_ledger() -> Result<Ledger<MemoryStore>> {
    Ledger::load(MemoryStore::new()).await
}

/// Registration input with sensible defaults.
///
/// # Defaults
/// * `color`: "Galaxy Black"
/// * `color_hex`: "#1e1e1e"
/// * `brand`: "Prusament"
#[must_use]
pub fn new_spool(material: &str, weight: f64) -> NewSpool {
    NewSpool {
        material: material.to_string(),
        color: "Galaxy Black".to_string(),
        color_hex: "#1e1e1e".to_string(),
        brand: "Prusament".to_string(),
        initial_weight: weight,
    }
}

/// A freshly registered spool that is not held by any ledger.
#[must_use]
pub fn sample_spool(material: &str, weight: f64) -> Spool {
    Spool::register(new_spool(material, weight))
}

/// Registers a spool with defaults from [`new_spool`].
pub async fn register_test_spool<S: Store>(
    ledger: &mut Ledger<S>,
    material: &str,
    weight: f64,
) -> Result<Spool> {
    ledger.register_spool(new_spool(material, weight)).await
}

/// Logs a print named "Test print" against `spool_id`.
pub async fn log_test_print<S: Store>(
    ledger: &mut Ledger<S>,
    spool_id: SpoolId,
    weight_used: f64,
) -> Result<PrintLog> {
    ledger
        .log_print(NewPrintLog {
            spool_id,
            print_name: "Test print".to_string(),
            weight_used,
        })
        .await
}

/// Store that starts empty and refuses every write.
#[derive(Debug)]
pub struct FailingStore;

impl Store for FailingStore {
    async fn load_spools(&self) -> Result<Vec<Spool>> {
        Ok(Vec::new())
    }

    async fn load_print_logs(&self) -> Result<Vec<PrintLog>> {
        Ok(Vec::new())
    }

    async fn save_spools(&self, _spools: &[Spool]) -> Result<()> {
        Err(Error::Storage {
            message: "quota exceeded".to_string(),
        })
    }

    async fn save_print_logs(&self, _logs: &[PrintLog]) -> Result<()> {
        Err(Error::Storage {
            message: "quota exceeded".to_string(),
        })
    }

    async fn save_print(&self, _logs: &[PrintLog], _spools: &[Spool]) -> Result<()> {
        Err(Error::Storage {
            message: "quota exceeded".to_string(),
        })
    }
}

/// Makes every later insert or update of `key` in `kv_store` fail inside `SQLite`.
pub async fn reject_writes_to(db: &DatabaseConnection, key: &str) -> Result<()> {
    for event in ["INSERT", "UPDATE"] {
        db.execute_unprepared(&format!(
            "CREATE TRIGGER reject_{event}_{key} BEFORE {event} ON kv_store \
             WHEN NEW.key = '{key}' \
             BEGIN SELECT RAISE(ABORT, 'writes to {key} rejected'); END;"
        ))
        .await?;
    }
    Ok(())
}
