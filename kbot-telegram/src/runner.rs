//! REPL runner: converts teloxide messages to core messages, runs the handler chain in
//! a spawned task, and sends any Reply through the core Bot. Chain errors are logged and
//! never propagate; the relay keeps serving subsequent updates.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use kbot_core::{Bot as CoreBot, HandlerResponse};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;

/// Starts long polling with the given teloxide Bot, handler chain, and reply sender.
/// Each update is handled in its own task so polling is never blocked by a slow handler.
#[instrument(skip(bot, handler_chain, reply_bot))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    reply_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Bot identity confirmed");
    }

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();
            let reply_bot = reply_bot.clone();

            async move {
                let wrapper = TelegramMessageWrapper(&msg);
                let core_msg = wrapper.to_core();

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_type = %core_msg.message_type,
                    "Received message"
                );

                tokio::spawn(async move {
                    match chain.handle(&core_msg).await {
                        Ok(HandlerResponse::Reply(text)) => {
                            if let Err(e) = reply_bot.reply_to(&core_msg, &text).await {
                                error!(
                                    error = %e,
                                    user_id = core_msg.user.id,
                                    "Failed to send reply"
                                );
                            } else {
                                info!(
                                    user_id = core_msg.user.id,
                                    reply_len = text.len(),
                                    "Reply sent"
                                );
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                        }
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
