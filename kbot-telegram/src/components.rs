//! Builds the relay's components from config: teloxide bot, completion client,
//! knowledge store, prompt templates, and the handler chain. Everything is constructed
//! once at startup and injected; no process-wide state.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use completion_client::{AzureCompletionClient, CompletionClient, CompletionConfig};
use handler_chain::HandlerChain;
use kbot_core::Bot as CoreBot;
use knowledge::KnowledgeStore;
use prompt::PromptTemplates;
use relay_handlers::{CommandHandler, DocumentFetcher, DocumentHandler, QueryHandler};
use teloxide::Bot;
use tracing::error;

use crate::bot_adapter::TelegramBotAdapter;
use crate::config::RelayConfig;
use crate::fetcher::TelegramDocumentFetcher;

/// Shared components built from config; handlers receive clones of the Arcs.
#[derive(Clone)]
pub struct RelayComponents {
    pub teloxide_bot: Bot,
    pub reply_bot: Arc<dyn CoreBot>,
    pub client: Arc<dyn CompletionClient>,
    pub store: Arc<KnowledgeStore>,
    pub templates: Arc<PromptTemplates>,
}

/// Creates the teloxide Bot, honoring the optional API URL override.
pub fn build_teloxide_bot(config: &RelayConfig) -> Bot {
    let bot = Bot::new(config.telegram_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

/// Builds all components. Template loading failures are startup failures.
pub fn build_components(config: &RelayConfig) -> Result<RelayComponents> {
    let teloxide_bot = build_teloxide_bot(config);

    let completion_config = CompletionConfig::new(
        config.chatgpt_base_url.clone(),
        config.chatgpt_model.clone(),
        config.chatgpt_api_version.clone(),
        config.chatgpt_api_key.clone(),
    )
    .with_timeout(Duration::from_secs(config.completion_timeout_secs));
    let client: Arc<dyn CompletionClient> = Arc::new(
        AzureCompletionClient::new(completion_config)
            .context("Failed to build completion client")?,
    );

    let store = Arc::new(KnowledgeStore::new(&config.knowledge_path));

    let templates = Arc::new(
        PromptTemplates::load(
            Path::new(&config.query_template_path),
            Path::new(&config.encapsulate_template_path),
        )
        .with_context(|| {
            format!(
                "Failed to load prompt templates ({}, {})",
                config.query_template_path, config.encapsulate_template_path
            )
        })?,
    );

    let reply_bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    Ok(RelayComponents {
        teloxide_bot,
        reply_bot,
        client,
        store,
        templates,
    })
}

/// Command → document → query; order matters: commands never reach the query relay,
/// documents never fall through to it.
pub fn build_chain(components: &RelayComponents) -> HandlerChain {
    let fetcher: Arc<dyn DocumentFetcher> =
        Arc::new(TelegramDocumentFetcher::new(components.teloxide_bot.clone()));

    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new()))
        .add_handler(Arc::new(DocumentHandler::new(
            components.client.clone(),
            components.store.clone(),
            components.templates.clone(),
            fetcher,
        )))
        .add_handler(Arc::new(QueryHandler::new(
            components.client.clone(),
            components.store.clone(),
            components.templates.clone(),
        )))
}
