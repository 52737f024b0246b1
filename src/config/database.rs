//! Database configuration module for `SpoolBuddy`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::KvEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Default location of the local database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/spool_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database named by `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary tables from the entity definitions.
///
/// Existing tables are left untouched, so this is safe to call on every start.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut kv_table = schema.create_table_from_entity(KvEntry);
    kv_table.if_not_exists();

    db.execute(builder.build(&kv_table)).await?;
    info!("Database tables ensured");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::KvEntryModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let rows: Vec<KvEntryModel> = KvEntry::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
