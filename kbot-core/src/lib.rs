//! # kbot-core
//!
//! Core types and traits for the knowledge relay bot: [`Bot`], [`Handler`], message and user
//! types, error taxonomy, and tracing initialization. Transport-agnostic; used by
//! kbot-telegram, relay-handlers, and handler-chain.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, DocumentRef, Handler, HandlerResponse, Message, MessageDirection, User,
};
