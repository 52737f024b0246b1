use dotenvy::dotenv;
use spool_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    core::Ledger,
    errors::{Error, Result},
    store::DatabaseStore,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load application settings
    let config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect to the database and make sure the schema exists
    let database_url = database::get_database_url();
    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Load the ledger once; every mutation saves back through the store
    let store = DatabaseStore::new(db, config.storage.clone());
    let ledger = Ledger::load(store)
        .await
        .inspect_err(|e| error!("Failed to load inventory: {}", e))?;
    info!(
        spools = ledger.spools().len(),
        prints = ledger.print_logs().len(),
        "Inventory ready"
    );

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(ledger, config)).await
}

/// Directory of a file-backed `sqlite://` URL, so it can be created up front.
fn sqlite_parent_dir(database_url: &str) -> Option<&std::path::Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    std::path::Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}
