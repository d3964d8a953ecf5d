//! OnChain Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::{prelude::*, types::Update, utils::command::BotCommands};
use tracing::{error, info, warn};

use onchain_bot::{
    config::Settings,
    handlers::{self, Command, DialogEngine},
    services::{AlertScanner, HttpMarketData, NotificationDispatcher, Scheduler, TelegramNotifier},
    state::RedisStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", onchain_bot::info());

    // Initialize the session store
    info!("Connecting to Redis...");
    let store = Arc::new(RedisStore::new(settings.redis.clone()).await?);
    store.test_connection().await?;

    let provider = Arc::new(HttpMarketData::new(settings.providers.clone())?);

    let bot = Bot::new(&settings.bot.token);
    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));

    let engine = DialogEngine::new(
        store.clone(),
        provider.clone(),
        notifier.clone(),
        settings.scheduler.wait_notice_delay(),
    );

    // Background tasks
    let dispatcher_service = NotificationDispatcher::new(store.clone(), provider.clone(), notifier);
    let scanner = AlertScanner::new(store, provider, dispatcher_service.clone());
    let mut scheduler = Scheduler::new(settings.scheduler.clone(), scanner, dispatcher_service);
    scheduler.start();

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    scheduler.stop();
    info!("OnChain bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_commands),
        )
        .branch(
            // Handle everything else as dialog input
            dptree::endpoint(handle_messages),
        )
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, engine: DialogEngine) -> HandlerResult {
    if let Err(e) = handlers::handle_command(bot, msg, cmd, engine).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, engine: DialogEngine) -> HandlerResult {
    if let Err(e) = handlers::handle_message(bot, msg, engine).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
