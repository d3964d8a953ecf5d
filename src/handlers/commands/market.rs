//! Market data commands: /btc, /balance, /wallet

use teloxide::{prelude::*, types::Message, Bot};
use crate::handlers::engine::DialogEngine;
use crate::handlers::menu;
use crate::handlers::messages::send_reply;
use crate::utils::errors::Result;

pub async fn handle_btc(bot: Bot, msg: Message, engine: DialogEngine) -> Result<()> {
    let address = msg.chat.id.to_string();
    let reply = engine.spot_price(&address).await;
    send_reply(&bot, msg.chat.id, &reply).await
}

/// Balance of the chat's wallet. The session step is left alone.
pub async fn handle_balance(bot: Bot, msg: Message, engine: DialogEngine) -> Result<()> {
    let address = msg.chat.id.to_string();
    let mut reply = menu::account_balance(&engine, &address).await?;
    reply.show_menu = false;
    send_reply(&bot, msg.chat.id, &reply).await
}

pub async fn handle_wallet(bot: Bot, msg: Message, engine: DialogEngine, wallet: String) -> Result<()> {
    let address = msg.chat.id.to_string();
    if wallet.trim().is_empty() {
        bot.send_message(msg.chat.id, "Usage: /wallet <address>").await?;
        return Ok(());
    }

    let reply = engine.link_wallet(&address, &wallet).await?;
    send_reply(&bot, msg.chat.id, &reply).await
}
