//! Command handler: replies to `/start` and `/help`, swallows other commands.

use async_trait::async_trait;
use kbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::info;

/// Static help text for `/help`.
pub const HELP_TEXT: &str = "Send me a question and I will answer it using my accumulated knowledge.\n\
Upload a .txt or .md document and I will summarize it and remember the summary.\n\
/start - greeting\n\
/help - this message";

/// Handles bot commands. Unknown commands stop the chain without a reply,
/// matching a relay that registers no handler for them.
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the leading `/command` token, with any `@botname` suffix stripped,
/// or None for non-command text.
fn command_token(content: &str) -> Option<&str> {
    let first = content.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    Some(first.split('@').next().unwrap_or(first))
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.message_type != "text" {
            return Ok(HandlerResponse::Continue);
        }
        let Some(command) = command_token(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };

        match command {
            "/start" => {
                info!(user_id = message.user.id, "start command");
                Ok(HandlerResponse::Reply(format!(
                    "Hi {}!",
                    message.user.display_name()
                )))
            }
            "/help" => {
                info!(user_id = message.user.id, "help command");
                Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
            }
            other => {
                info!(user_id = message.user.id, command = %other, "unknown command ignored");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
