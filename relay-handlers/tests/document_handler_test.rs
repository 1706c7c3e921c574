//! Integration tests for [`relay_handlers::DocumentHandler`].
//!
//! Uses recording CompletionClient and DocumentFetcher mocks and a temp-dir knowledge
//! store. Covers the unsupported-type short-circuit, the full ingestion flow, scoped
//! temp-file cleanup on success and failure, and the no-append-on-failure rule.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use completion_client::{CompletionClient, CompletionError};
use kbot_core::{
    Chat, DocumentRef, Handler, HandlerError, HandlerResponse, Message, MessageDirection, User,
};
use knowledge::KnowledgeStore;
use prompt::PromptTemplates;
use relay_handlers::{
    DocumentFetcher, DocumentHandler, MSG_INGESTED, MSG_INGEST_FAILED, MSG_NOT_TEXT,
    MSG_UNSUPPORTED_FILE,
};
use tempfile::TempDir;

/// Records submitted prompts; pops queued results.
struct RecordingClient {
    prompts: Mutex<Vec<String>>,
    results: Mutex<Vec<Result<String, CompletionError>>>,
}

impl RecordingClient {
    fn new(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            results: Mutex::new(results),
        }
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn submit(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            panic!("RecordingClient: no queued result");
        }
        results.remove(0)
    }
}

/// Writes fixed bytes to the destination (or fails), recording the destination path
/// so tests can assert the temp file is gone afterwards.
struct RecordingFetcher {
    bytes: Option<Vec<u8>>,
    error: Option<String>,
    fetched_to: Mutex<Option<PathBuf>>,
}

impl RecordingFetcher {
    fn with_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: Some(bytes.to_vec()),
            error: None,
            fetched_to: Mutex::new(None),
        }
    }

    fn with_transfer_error(detail: &str) -> Self {
        Self {
            bytes: None,
            error: Some(detail.to_string()),
            fetched_to: Mutex::new(None),
        }
    }

    fn fetched_to(&self) -> Option<PathBuf> {
        self.fetched_to.lock().unwrap().clone()
    }

    fn was_called(&self) -> bool {
        self.fetched_to.lock().unwrap().is_some()
    }
}

#[async_trait]
impl DocumentFetcher for RecordingFetcher {
    async fn fetch_to(&self, _file_id: &str, dest: &Path) -> Result<(), HandlerError> {
        *self.fetched_to.lock().unwrap() = Some(dest.to_path_buf());
        if let Some(detail) = &self.error {
            return Err(HandlerError::Transfer(detail.clone()));
        }
        tokio::fs::write(dest, self.bytes.as_ref().unwrap()).await?;
        Ok(())
    }
}

fn document_message(file_name: &str) -> Message {
    Message {
        id: "m1".to_string(),
        user: User {
            id: 123,
            username: Some("user".to_string()),
            first_name: Some("User".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: String::new(),
        message_type: "document".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        document: Some(DocumentRef {
            file_id: "file_1".to_string(),
            file_name: file_name.to_string(),
            mime_type: None,
        }),
    }
}

struct Fixture {
    _dir: TempDir,
    client: Arc<RecordingClient>,
    fetcher: Arc<RecordingFetcher>,
    handler: DocumentHandler,
    store: Arc<KnowledgeStore>,
}

fn fixture(
    results: Vec<Result<String, CompletionError>>,
    fetcher: RecordingFetcher,
) -> Fixture {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(RecordingClient::new(results));
    let fetcher = Arc::new(fetcher);
    let store = Arc::new(KnowledgeStore::new(dir.path().join("knowledge.txt")));
    let templates = Arc::new(PromptTemplates::new("INSTRUCTIONS\n", "ENCAPSULATE"));
    let handler = DocumentHandler::new(
        client.clone(),
        store.clone(),
        templates,
        fetcher.clone(),
    );
    Fixture {
        _dir: dir,
        client,
        fetcher,
        handler,
        store,
    }
}

/// **Test: an unsupported extension is rejected before any I/O — no fetch, no
/// completion call, knowledge file byte-identical.**
#[tokio::test]
async fn test_unsupported_extension_short_circuits() {
    let f = fixture(vec![], RecordingFetcher::with_bytes(b"ignored"));
    f.store.append("pre-existing").await.unwrap();
    let before = f.store.read().await.unwrap();

    let response = f.handler.handle(&document_message("notes.pdf")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(MSG_UNSUPPORTED_FILE.to_string())
    );
    assert!(!f.fetcher.was_called());
    assert_eq!(f.client.call_count(), 0);
    assert_eq!(f.store.read().await.unwrap(), before);
}

/// **Test: full ingestion — encapsulation prompt carries the document text, the summary
/// is appended with a newline, the user gets the confirmation, and the temp file is gone.**
#[tokio::test]
async fn test_successful_ingestion_appends_summary() {
    let f = fixture(
        vec![Ok("compact summary".to_string())],
        RecordingFetcher::with_bytes(b"document body text"),
    );

    let response = f.handler.handle(&document_message("notes.md")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply(MSG_INGESTED.to_string()));
    assert_eq!(f.store.read().await.unwrap(), "compact summary\n");

    let prompts = f.client.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], "ENCAPSULATE\ndocument body text");

    let temp_path = f.fetcher.fetched_to().expect("fetcher called");
    assert!(!temp_path.exists(), "temp file must be deleted");
}

/// **Test: a transfer failure gets the apology, appends nothing, and leaves no temp file.**
#[tokio::test]
async fn test_transfer_failure_cleans_up_and_appends_nothing() {
    let f = fixture(vec![], RecordingFetcher::with_transfer_error("HTTP 502"));

    let response = f.handler.handle(&document_message("notes.txt")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(MSG_INGEST_FAILED.to_string())
    );
    assert_eq!(f.client.call_count(), 0);
    assert_eq!(f.store.read().await.unwrap(), "");

    let temp_path = f.fetcher.fetched_to().expect("fetcher called");
    assert!(!temp_path.exists(), "temp file must be deleted on failure");
}

/// **Test: non-UTF-8 bytes get the distinct decode reply and append nothing.**
#[tokio::test]
async fn test_non_utf8_document_rejected() {
    let f = fixture(vec![], RecordingFetcher::with_bytes(&[0xff, 0xfe, 0xfd]));

    let response = f.handler.handle(&document_message("notes.txt")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply(MSG_NOT_TEXT.to_string()));
    assert_eq!(f.client.call_count(), 0);
    assert_eq!(f.store.read().await.unwrap(), "");
}

/// **Test: a completion failure during ingestion appends nothing — the error
/// diagnostic never reaches the knowledge file.**
#[tokio::test]
async fn test_completion_failure_appends_nothing() {
    let f = fixture(
        vec![Err(CompletionError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        })],
        RecordingFetcher::with_bytes(b"document body"),
    );

    let response = f.handler.handle(&document_message("notes.txt")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(MSG_INGEST_FAILED.to_string())
    );
    assert_eq!(f.store.read().await.unwrap(), "");

    let temp_path = f.fetcher.fetched_to().expect("fetcher called");
    assert!(!temp_path.exists());
}

/// **Test: a text message passes through untouched.**
#[tokio::test]
async fn test_text_message_continues() {
    let f = fixture(vec![], RecordingFetcher::with_bytes(b""));
    let mut message = document_message("notes.txt");
    message.message_type = "text".to_string();
    message.document = None;
    message.content = "hello".to_string();

    let response = f.handler.handle(&message).await.unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(!f.fetcher.was_called());
}
