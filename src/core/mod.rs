//! Core inventory logic - framework-agnostic spool, print-log, and ledger types.

/// Inventory ledger: the owner and sole mutator of both collections
pub mod ledger;
/// Print-log records
pub mod print_log;
/// Spool records and deduction rules
pub mod spool;
/// Dashboard aggregates and formatting helpers
pub mod stats;
/// Advisory form validation
pub mod validation;

pub use ledger::{Ledger, LogEntry, SpoolLookup};
pub use print_log::{NewPrintLog, PrintLog};
pub use spool::{NewSpool, Spool, SpoolId, SpoolStatus};
