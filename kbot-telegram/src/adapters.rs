//! Adapters from Telegram (teloxide) types to kbot_core types.
//! Depends only on teloxide and kbot_core type definitions.

use kbot_core::{Chat, DocumentRef, Message, MessageDirection, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_core(&self) -> Message {
        let document = self.0.document().map(|doc| DocumentRef {
            file_id: doc.file.id.to_string(),
            file_name: doc
                .file_name
                .clone()
                .unwrap_or_else(|| "document".to_string()),
            mime_type: doc.mime_type.as_ref().map(|m| m.to_string()),
        });

        // For document messages the caption plays the content role.
        let content = self
            .0
            .text()
            .or_else(|| self.0.caption())
            .unwrap_or("")
            .to_string();

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content,
            message_type: if document.is_some() {
                "document".to_string()
            } else {
                "text".to_string()
            },
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
            document,
        }
    }
}
