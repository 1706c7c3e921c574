//! # Knowledge store
//!
//! A single append-only text file of ingested document summaries. The whole content is
//! read for every query prompt; a summary line is appended after each successful ingestion.
//!
//! Writes are serialized by an async mutex so concurrent ingestions never interleave or
//! truncate each other. Reads take no lock: a query racing an ingestion may miss the
//! newest summary (last-appended-wins), which is acceptable for this store.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Append-only knowledge file. Created on first append; grows forever; never rotated
/// or truncated by this system.
pub struct KnowledgeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full current content. A store that has never been appended to
    /// reads as empty; any other I/O failure propagates to the handler boundary.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read(&self) -> io::Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    /// Appends `summary` plus a trailing newline as one record.
    ///
    /// Holds the store's write lock for the whole open-write-flush sequence and writes
    /// the record as a single buffer, so sequential and concurrent callers produce the
    /// same file: every record intact, in some serial order.
    #[instrument(skip(self, summary), fields(path = %self.path.display(), summary_len = summary.len()))]
    pub async fn append(&self, summary: &str) -> io::Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut record = String::with_capacity(summary.len() + 1);
        record.push_str(summary);
        record.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;

        debug!(record_len = record.len(), "appended knowledge record");
        Ok(())
    }
}
