//! Core types: user, chat, message, document reference, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name used when addressing the user in replies: first name, then username, then "there".
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Reference to an uploaded document; `file_id` is resolved to bytes by a `DocumentFetcher`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    pub file_id: String,
    pub file_name: String,
    pub mime_type: Option<String>,
}

/// A single message with user, chat, content, and optional document attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text content; for document messages this is the caption (may be empty).
    pub content: String,
    /// `"text"` or `"document"`.
    pub message_type: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    /// Present only for document messages.
    pub document: Option<DocumentRef>,
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Handler result for the chain. `Reply(text)` carries the response body; the runner sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and reply with the given text.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle
/// until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_name() {
        let user = User {
            id: 1,
            username: Some("u".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
        };
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_username_then_there() {
        let mut user = User {
            id: 1,
            username: Some("ada_l".to_string()),
            first_name: None,
            last_name: None,
        };
        assert_eq!(user.display_name(), "ada_l");
        user.username = None;
        assert_eq!(user.display_name(), "there");
    }
}
