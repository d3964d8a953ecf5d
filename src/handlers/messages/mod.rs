//! Message handlers module
//!
//! Feeds incoming text messages through the dialog engine and sends the reply

use teloxide::{prelude::*, types::{ChatId, Message}, Bot};
use tracing::{debug, error};
use crate::handlers::engine::{DialogEngine, Reply};
use crate::handlers::texts::{GENERIC_ERROR, MENU};
use crate::utils::errors::Result;

/// Handle incoming text messages. Anything without text is ignored.
pub async fn handle_message(bot: Bot, msg: Message, engine: DialogEngine) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = ?msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };

    let address = msg.chat.id.to_string();
    let reply = match engine.handle(&address, text).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(
                address = %address,
                error = %e,
                severity = %e.severity(),
                recoverable = e.is_recoverable(),
                "Dialog engine failed"
            );
            Reply::text(GENERIC_ERROR, true)
        }
    };

    send_reply(&bot, msg.chat.id, &reply).await
}

/// Send the reply body, then the menu if requested
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    if let Some(text) = reply.text.as_deref().filter(|text| !text.is_empty()) {
        bot.send_message(chat_id, text).await?;
    }
    if reply.show_menu {
        bot.send_message(chat_id, MENU).await?;
    }
    Ok(())
}
