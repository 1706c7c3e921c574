//! # Completion client abstraction
//!
//! Defines the [`CompletionClient`] trait and an Azure-style deployment endpoint
//! implementation. Transport-agnostic callers (relay-handlers) depend on the trait;
//! tests substitute recording implementations.

use async_trait::async_trait;
use thiserror::Error;

mod azure;

pub use azure::{AzureCompletionClient, CompletionConfig, DEFAULT_TIMEOUT_SECS};

/// Failure kinds of one completion call, kept distinct so callers can decide
/// what reaches the end user.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport-level failure (connect, TLS, timeout) before a status was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The endpoint answered 2xx but the body was not the expected shape.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Completion client interface: submit one prompt, get the reply text.
///
/// One outbound call per invocation; no retry; nothing persisted.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String, CompletionError>;
}
