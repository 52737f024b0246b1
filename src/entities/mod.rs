//! Entity module - Contains the SeaORM entity definitions for the database.
//! The ledger stores its collections as documents, so a single key/value
//! table is all the schema there is.

pub mod kv_entry;

pub use kv_entry::{Column as KvEntryColumn, Entity as KvEntry, Model as KvEntryModel};
