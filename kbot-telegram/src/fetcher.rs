//! Telegram implementation of [`relay_handlers::DocumentFetcher`].
//!
//! Resolves the file id through `getFile`, then streams the content to the destination
//! in bounded chunks via `teloxide::net::Download` (never the whole body in one buffer).
//! Remote transfer failures map to `HandlerError::Transfer`; local ones to
//! `HandlerError::Io`.

use std::path::Path;

use async_trait::async_trait;
use kbot_core::HandlerError;
use relay_handlers::DocumentFetcher;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub struct TelegramDocumentFetcher {
    bot: teloxide::Bot,
}

impl TelegramDocumentFetcher {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl DocumentFetcher for TelegramDocumentFetcher {
    async fn fetch_to(&self, file_id: &str, dest: &Path) -> Result<(), HandlerError> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| HandlerError::Transfer(format!("getFile failed: {}", e)))?;

        debug!(file_path = %file.path, dest = %dest.display(), "downloading document");

        let mut destination = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut destination)
            .await
            .map_err(|e| match e {
                teloxide::DownloadError::Network(err) => {
                    HandlerError::Transfer(err.to_string())
                }
                teloxide::DownloadError::Io(err) => {
                    HandlerError::Io(std::io::Error::new(err.kind(), err))
                }
            })?;
        destination.flush().await?;

        Ok(())
    }
}
