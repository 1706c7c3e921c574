//! Relay configuration, loaded once from environment variables.
//!
//! Required keys (missing is fatal at startup): TELEGRAM_ACCESS_TOKEN, CHATGPT_BASICURL,
//! CHATGPT_MODELNAME, CHATGPT_APIVERSION, CHATGPT_ACCESS_TOKEN. Everything else has a
//! default. Load .env with dotenvy before calling [`RelayConfig::load`].

use anyhow::{Context, Result};
use std::env;

#[derive(Debug)]
pub struct RelayConfig {
    pub telegram_token: String,
    pub chatgpt_base_url: String,
    pub chatgpt_model: String,
    pub chatgpt_api_version: String,
    pub chatgpt_api_key: String,
    /// Timeout for one completion call, seconds.
    pub completion_timeout_secs: u64,
    pub query_template_path: String,
    pub encapsulate_template_path: String,
    pub knowledge_path: String,
    pub log_file: String,
    /// Optional Telegram Bot API base URL override (e.g. a mock server in tests).
    /// Env: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
}

impl RelayConfig {
    /// Loads config from environment variables. If `token` is provided it overrides
    /// TELEGRAM_ACCESS_TOKEN. Missing required keys fail with the key named.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram_token = match token {
            Some(token) => token,
            None => env::var("TELEGRAM_ACCESS_TOKEN")
                .context("TELEGRAM_ACCESS_TOKEN not set")?,
        };
        let chatgpt_base_url =
            env::var("CHATGPT_BASICURL").context("CHATGPT_BASICURL not set")?;
        let chatgpt_model =
            env::var("CHATGPT_MODELNAME").context("CHATGPT_MODELNAME not set")?;
        let chatgpt_api_version =
            env::var("CHATGPT_APIVERSION").context("CHATGPT_APIVERSION not set")?;
        let chatgpt_api_key =
            env::var("CHATGPT_ACCESS_TOKEN").context("CHATGPT_ACCESS_TOKEN not set")?;

        let completion_timeout_secs = env::var("COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(completion_client::DEFAULT_TIMEOUT_SECS);
        let query_template_path = env::var("QUERY_TEMPLATE_PATH")
            .unwrap_or_else(|_| "templates/query.txt".to_string());
        let encapsulate_template_path = env::var("ENCAPSULATE_TEMPLATE_PATH")
            .unwrap_or_else(|_| "templates/encapsulate.txt".to_string());
        let knowledge_path =
            env::var("KNOWLEDGE_PATH").unwrap_or_else(|_| "data/knowledge.txt".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/kbot.log".to_string());

        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Ok(Self {
            telegram_token,
            chatgpt_base_url,
            chatgpt_model,
            chatgpt_api_version,
            chatgpt_api_key,
            completion_timeout_secs,
            query_template_path,
            encapsulate_template_path,
            knowledge_path,
            log_file,
            telegram_api_url,
        })
    }

    /// Rejects empty required settings (a set-but-empty env var is as fatal as a missing one).
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("TELEGRAM_ACCESS_TOKEN", &self.telegram_token),
            ("CHATGPT_BASICURL", &self.chatgpt_base_url),
            ("CHATGPT_MODELNAME", &self.chatgpt_model),
            ("CHATGPT_APIVERSION", &self.chatgpt_api_version),
            ("CHATGPT_ACCESS_TOKEN", &self.chatgpt_api_key),
        ];
        for (name, value) in required {
            anyhow::ensure!(!value.trim().is_empty(), "{} is empty", name);
        }
        Ok(())
    }
}
