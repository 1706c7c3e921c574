//! Document handler: ingests an uploaded .txt/.md document into the knowledge file.
//!
//! Flow: validate extension (before any I/O) → stream the document into a scoped temp
//! file → decode as UTF-8 → encapsulation prompt → completion → append summary →
//! confirmation reply. The temp file is deleted on every path; a failed completion
//! appends nothing.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use completion_client::CompletionClient;
use kbot_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use knowledge::KnowledgeStore;
use prompt::{build_ingestion, PromptTemplates};
use tracing::{error, info, warn};

/// Extensions accepted for ingestion (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Rejection for any other extension; sent before any download happens.
pub const MSG_UNSUPPORTED_FILE: &str = "Sorry, I can only ingest .txt or .md documents.";

/// Apology for transfer, completion, or storage failures during ingestion.
pub const MSG_INGEST_FAILED: &str =
    "Sorry, I couldn't ingest that document. Please try again later.";

/// Reply when the downloaded bytes are not valid UTF-8 text.
pub const MSG_NOT_TEXT: &str = "Sorry, that document doesn't look like readable text.";

/// Confirmation after the summary has been appended to the knowledge file.
pub const MSG_INGESTED: &str =
    "Document ingested; its summary was added to my knowledge.";

/// Returns true when the file name carries a supported text extension.
pub fn is_supported_document(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Streams a platform document into a local file. Implemented by the Telegram shell;
/// tests substitute a recording impl. Remote transfer failures are
/// [`HandlerError::Transfer`], local ones [`HandlerError::Io`].
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_to(&self, file_id: &str, dest: &Path)
        -> std::result::Result<(), HandlerError>;
}

/// Ingests uploaded documents into the knowledge store.
pub struct DocumentHandler {
    client: Arc<dyn CompletionClient>,
    store: Arc<KnowledgeStore>,
    templates: Arc<PromptTemplates>,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl DocumentHandler {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        store: Arc<KnowledgeStore>,
        templates: Arc<PromptTemplates>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self {
            client,
            store,
            templates,
            fetcher,
        }
    }

    /// Downloads the document into a temp file and returns its decoded text.
    /// The temp file lives only inside this call; RAII deletes it on every path.
    async fn download_text(&self, file_id: &str) -> std::result::Result<String, HandlerError> {
        let temp = tempfile::NamedTempFile::new()?;
        self.fetcher.fetch_to(file_id, temp.path()).await?;
        let bytes = tokio::fs::read(temp.path()).await?;
        drop(temp);
        String::from_utf8(bytes).map_err(|e| HandlerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Handler for DocumentHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(document) = &message.document else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            user_id = message.user.id,
            file_name = %document.file_name,
            "document received"
        );

        if !is_supported_document(&document.file_name) {
            info!(
                user_id = message.user.id,
                file_name = %document.file_name,
                "unsupported document type rejected"
            );
            return Ok(HandlerResponse::Reply(MSG_UNSUPPORTED_FILE.to_string()));
        }

        let text = match self.download_text(&document.file_id).await {
            Ok(text) => text,
            Err(e @ HandlerError::Decode(_)) => {
                warn!(error = %e, user_id = message.user.id, "document is not UTF-8 text");
                return Ok(HandlerResponse::Reply(MSG_NOT_TEXT.to_string()));
            }
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "document download failed");
                return Ok(HandlerResponse::Reply(MSG_INGEST_FAILED.to_string()));
            }
        };

        let prompt = match build_ingestion(&self.templates, &text) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, user_id = message.user.id, "ingestion prompt over size limit");
                return Ok(HandlerResponse::Reply(MSG_INGEST_FAILED.to_string()));
            }
        };

        let summary = match self.client.submit(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "summarization failed");
                return Ok(HandlerResponse::Reply(MSG_INGEST_FAILED.to_string()));
            }
        };

        if let Err(e) = self.store.append(&summary).await {
            error!(error = %e, user_id = message.user.id, "failed to append summary");
            return Ok(HandlerResponse::Reply(MSG_INGEST_FAILED.to_string()));
        }

        info!(
            user_id = message.user.id,
            file_name = %document.file_name,
            summary_len = summary.len(),
            "document ingested"
        );
        Ok(HandlerResponse::Reply(MSG_INGESTED.to_string()))
    }
}
