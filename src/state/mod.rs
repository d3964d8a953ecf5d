//! State management module
//!
//! This module handles conversation state and the session store it lives in

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::{Flow, FlowKind, GasStep, HistoryStep, Session, SUBSCRIBED};
pub use storage::{MemoryStore, RedisStore, SessionStore};
