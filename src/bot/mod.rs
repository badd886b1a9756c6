//! Bot module - Telegram edge, receive loop supervision and health endpoint.

pub mod dispatcher;
pub mod health;
pub mod runtime;
pub mod transport;
pub mod webhook;

pub use dispatcher::{AppState, ThrottledBot};
pub use runtime::{Supervisor, run};
pub use transport::TelegramTransport;
