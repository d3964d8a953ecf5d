//! Multi-turn flows entered from the menu

pub mod gas_alert;
pub mod history;
