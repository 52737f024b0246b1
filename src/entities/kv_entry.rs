//! Key/value entity - Backing table for the ledger's persisted collections.
//!
//! Each row stores one whole collection (all spools, or all print logs) as a
//! JSON document under a fixed key. Saving replaces the document in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key/value database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_store")]
pub struct Model {
    /// Storage key (e.g., `"filament_spools"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON encoding of the stored collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTimeUtc,
}

/// Key/value rows have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
