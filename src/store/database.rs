use crate::{
    config::settings::StorageConfig,
    core::{PrintLog, Spool},
    entities::{KvEntry, kv_entry},
    errors::Result,
    store::Store,
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
    sea_query::OnConflict,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

/// Stores each collection as one JSON document in the `kv_store` table.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
    keys: StorageConfig,
}

impl DatabaseStore {
    /// Wraps an open connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection, keys: StorageConfig) -> Self {
        Self { db, keys }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    #[instrument(skip(self))]
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(entry) = KvEntry::find_by_id(key.to_string()).one(&self.db).await? else {
            debug!("Nothing stored yet");
            return Ok(Vec::new());
        };
        let records: Vec<T> = serde_json::from_str(&entry.value)?;
        debug!(count = records.len(), "Loaded stored records");
        Ok(records)
    }

    async fn save<T: Serialize + Sync>(&self, key: &str, records: &[T]) -> Result<()> {
        upsert_document(&self.db, key, records).await
    }
}

/// Upserts the whole document under `key` on `db`, which may be a transaction.
#[instrument(skip(db, records), fields(count = records.len()))]
async fn upsert_document<C, T>(db: &C, key: &str, records: &[T]) -> Result<()>
where
    C: ConnectionTrait,
    T: Serialize + Sync,
{
    let value = serde_json::to_string_pretty(records)?;
    let entry = kv_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(chrono::Utc::now()),
    };

    KvEntry::insert(entry)
        .on_conflict(
            OnConflict::column(kv_entry::Column::Key)
                .update_columns([kv_entry::Column::Value, kv_entry::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    debug!("Saved records");
    Ok(())
}

impl Store for DatabaseStore {
    async fn load_spools(&self) -> Result<Vec<Spool>> {
        self.load(&self.keys.spools_key).await
    }

    async fn load_print_logs(&self) -> Result<Vec<PrintLog>> {
        self.load(&self.keys.logs_key).await
    }

    async fn save_spools(&self, spools: &[Spool]) -> Result<()> {
        self.save(&self.keys.spools_key, spools).await
    }

    async fn save_print_logs(&self, logs: &[PrintLog]) -> Result<()> {
        self.save(&self.keys.logs_key, logs).await
    }

    #[instrument(skip_all, fields(logs = logs.len(), spools = spools.len()))]
    async fn save_print(&self, logs: &[PrintLog], spools: &[Spool]) -> Result<()> {
        // Both documents commit together or not at all
        let txn = self.db.begin().await?;
        upsert_document(&txn, &self.keys.logs_key, logs).await?;
        upsert_document(&txn, &self.keys.spools_key, spools).await?;
        txn.commit().await?;
        Ok(())
    }
}
