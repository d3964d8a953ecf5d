//! Bot handlers module
//!
//! This module contains the dialog engine and the Telegram handlers on top of it:
//! - Command handlers for bot commands
//! - Message handlers for plain text
//! - The menu and the multi-turn flows the engine dispatches to

pub mod commands;
pub mod engine;
pub mod flows;
pub mod menu;
pub mod messages;
pub mod texts;
pub mod wait;

// Re-export commonly used handler types
pub use commands::{handle_command, Command};
pub use engine::{DialogEngine, Reply};
pub use messages::handle_message;
