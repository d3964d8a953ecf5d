//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod help;
pub mod market;
pub mod start;

use teloxide::{types::Message, utils::command::BotCommands, Bot};
use crate::handlers::engine::DialogEngine;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "OnChain bot commands:")]
pub enum Command {
    #[command(description = "Show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Get the current Bitcoin price")]
    Btc,
    #[command(description = "Get your account balance across supported chains")]
    Balance,
    #[command(description = "Link a wallet to this chat: /wallet <address>")]
    Wallet(String),
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, engine: DialogEngine) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, engine).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Btc => market::handle_btc(bot, msg, engine).await,
        Command::Balance => market::handle_balance(bot, msg, engine).await,
        Command::Wallet(wallet) => market::handle_wallet(bot, msg, engine, wallet).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "onchain_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/btc", "onchain_bot").unwrap(), Command::Btc);
        assert_eq!(
            Command::parse("/wallet 0x52908400098527886E0F7030069857D2E4169EE7", "onchain_bot").unwrap(),
            Command::Wallet("0x52908400098527886E0F7030069857D2E4169EE7".to_string())
        );
        assert!(Command::parse("/events", "onchain_bot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for command in ["/start", "/help", "/btc", "/balance", "/wallet"] {
            assert!(descriptions.contains(command), "missing {}", command);
        }
    }
}
