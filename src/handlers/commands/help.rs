//! Help command handler

use teloxide::{prelude::*, types::Message, utils::command::BotCommands, Bot};
use super::Command;
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = format!(
        "{}\n\nOutside of commands, send any message to open the menu and answer with an option number. \
         Type 'stop' at any time to unsubscribe and reset the conversation.",
        Command::descriptions()
    );

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
