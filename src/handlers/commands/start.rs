//! Start command handler

use teloxide::{prelude::*, types::Message, Bot};
use tracing::info;
use crate::handlers::engine::DialogEngine;
use crate::handlers::texts::MENU;
use crate::utils::errors::Result;

/// Handle /start command: reset the conversation onto the menu
pub async fn handle_start(bot: Bot, msg: Message, engine: DialogEngine) -> Result<()> {
    let address = msg.chat.id.to_string();
    info!(address = %address, "Start command received");

    engine.restart(&address).await?;
    bot.send_message(msg.chat.id, MENU).await?;
    Ok(())
}
