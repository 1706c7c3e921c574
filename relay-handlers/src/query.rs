//! Query handler: relays a plain text message through the completion endpoint.
//!
//! Prompt = query template + current knowledge + preamble + user text. On success the
//! reply is the model text unaltered. Completion failures are forwarded as an
//! `Error: …` diagnostic reply; local I/O failures get a generic apology. Nothing
//! propagates out of the handler.

use std::sync::Arc;

use async_trait::async_trait;
use completion_client::CompletionClient;
use kbot_core::{Handler, HandlerResponse, Message, Result};
use knowledge::KnowledgeStore;
use prompt::{build_query, PromptError, PromptTemplates};
use tracing::{error, info, warn};

/// Apology sent when the request cannot be processed locally (I/O, oversized prompt).
pub const MSG_TRY_AGAIN: &str = "Sorry, I can't respond right now. Please try again later.";

/// How much inbound text is kept in log fields.
const LOG_CONTENT_MAX_CHARS: usize = 120;

fn truncate_for_log(text: &str) -> String {
    text.chars().take(LOG_CONTENT_MAX_CHARS).collect()
}

/// Relays text questions to the completion endpoint, augmented with the knowledge file.
pub struct QueryHandler {
    client: Arc<dyn CompletionClient>,
    store: Arc<KnowledgeStore>,
    templates: Arc<PromptTemplates>,
}

impl QueryHandler {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        store: Arc<KnowledgeStore>,
        templates: Arc<PromptTemplates>,
    ) -> Self {
        Self {
            client,
            store,
            templates,
        }
    }
}

#[async_trait]
impl Handler for QueryHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.message_type != "text" {
            return Ok(HandlerResponse::Continue);
        }
        let text = message.content.trim();
        // Commands are dealt with earlier in the chain; guard anyway so this handler
        // never relays one when used standalone.
        if text.is_empty() || text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            content = %truncate_for_log(text),
            "relaying user question"
        );

        let knowledge = match self.store.read().await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "failed to read knowledge file");
                return Ok(HandlerResponse::Reply(MSG_TRY_AGAIN.to_string()));
            }
        };

        let prompt = match build_query(&self.templates, &knowledge, text) {
            Ok(prompt) => prompt,
            Err(e @ PromptError::TooLarge { .. }) => {
                warn!(error = %e, user_id = message.user.id, "query prompt over size limit");
                return Ok(HandlerResponse::Reply(MSG_TRY_AGAIN.to_string()));
            }
        };

        match self.client.submit(&prompt).await {
            Ok(reply) => {
                info!(
                    user_id = message.user.id,
                    reply_len = reply.len(),
                    "completion reply relayed"
                );
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "completion call failed");
                Ok(HandlerResponse::Reply(format!("Error: {}", e)))
            }
        }
    }
}
