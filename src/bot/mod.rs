//! Bot layer - Discord-specific interface and command handlers
//!
//! This module is the presentation layer of `SpoolBuddy`: slash commands that
//! render the dashboard, the inventory, and the print history, and that turn
//! the inventory and usage forms into ledger calls.

/// Discord command implementations (dashboard, inventory, usage, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::Config,
    core::Ledger,
    errors::{Error, Result},
    store::DatabaseStore,
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The ledger sits behind one async mutex, so commands never interleave
/// their reads and writes.
pub struct BotData {
    /// The inventory ledger
    pub ledger: Mutex<Ledger<DatabaseStore>>,
    /// Loaded application settings
    pub config: Config,
}

impl BotData {
    /// Creates a new `BotData` instance from a loaded ledger.
    #[must_use]
    pub fn new(ledger: Ledger<DatabaseStore>, config: Config) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            config,
        }
    }
}

/// Poise context type used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::dashboard(),
                commands::inventory(),
                commands::add_spool(),
                commands::remove_spool(),
                commands::log_print(),
                commands::history(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
