//! # relay-handlers
//!
//! The relay's handlers, run as a chain per inbound message:
//! [`CommandHandler`] (`/start`, `/help`) → [`DocumentHandler`] (ingestion) →
//! [`QueryHandler`] (plain text). Handlers return
//! [`kbot_core::HandlerResponse::Reply`]; the runner sends it. No handler failure
//! is allowed to propagate and stop the relay.

mod command;
mod document;
mod query;

pub use command::{CommandHandler, HELP_TEXT};
pub use document::{
    is_supported_document, DocumentFetcher, DocumentHandler, MSG_INGESTED,
    MSG_INGEST_FAILED, MSG_NOT_TEXT, MSG_UNSUPPORTED_FILE, SUPPORTED_EXTENSIONS,
};
pub use query::{QueryHandler, MSG_TRY_AGAIN};
