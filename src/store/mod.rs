//! Persistence port for the ledger.
//!
//! The ledger reads both collections once at startup and writes the complete
//! collection back after every mutation. Implementations decide where the
//! documents live; they never see diffs. A logged print touches both
//! collections and is written through [`Store::save_print`], which must store
//! both documents or neither.

/// `SeaORM`-backed key/value store
pub mod database;
/// In-process store
pub mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

use crate::{
    core::{PrintLog, Spool},
    errors::Result,
};
use std::future::Future;

/// Where the ledger's two collections are kept between runs
pub trait Store {
    /// Loads every stored spool, or an empty list if nothing was saved yet.
    fn load_spools(&self) -> impl Future<Output = Result<Vec<Spool>>> + Send;

    /// Loads every stored print log, most recent first, or an empty list.
    fn load_print_logs(&self) -> impl Future<Output = Result<Vec<PrintLog>>> + Send;

    /// Replaces the stored spool collection.
    fn save_spools(&self, spools: &[Spool]) -> impl Future<Output = Result<()>> + Send;

    /// Replaces the stored print log sequence.
    fn save_print_logs(&self, logs: &[PrintLog]) -> impl Future<Output = Result<()>> + Send;

    /// Replaces both collections as one unit. On error neither is changed.
    fn save_print(
        &self,
        logs: &[PrintLog],
        spools: &[Spool],
    ) -> impl Future<Output = Result<()>> + Send;
}
