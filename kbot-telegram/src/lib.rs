//! # kbot-telegram
//!
//! Telegram shell for the knowledge relay bot: teloxide adapters, [`kbot_core::Bot`]
//! implementation, document fetcher, env configuration, and the REPL runner.
//! Handles only Telegram connectivity and handler-chain execution; the relay logic
//! lives in relay-handlers.

mod adapters;
mod bot_adapter;
pub mod cli;
mod components;
mod config;
mod fetcher;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use cli::{Cli, Commands};
pub use components::{build_chain, build_components, build_teloxide_bot, RelayComponents};
pub use config::RelayConfig;
pub use fetcher::TelegramDocumentFetcher;
pub use runner::run_repl;
