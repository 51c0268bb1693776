//! Chat-facing side of the bot: command parsing, the dispatcher that turns
//! commands and uploads into replies, and the Telegram adapter.

mod command;
mod dispatcher;
pub mod messages;
pub mod telegram;

pub use command::*;
pub use dispatcher::*;
