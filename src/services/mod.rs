//! Services module
//!
//! Market data providers, outbound notifications and the background tasks

pub mod alerts;
pub mod notification;
pub mod providers;
pub mod scheduler;

// Re-export commonly used services
pub use alerts::{AlertScanner, ScanReport};
pub use notification::{DigestReport, NotificationDispatcher, Notifier, TelegramNotifier};
pub use providers::{HttpMarketData, MarketData};
pub use scheduler::Scheduler;
