//! Azure-style deployment endpoint implementation of [`CompletionClient`].
//!
//! POST `{base}/deployments/{model}/chat/completions/?api-version={version}` with an
//! `api-key` header and a single user-role message. The reply is `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{CompletionClient, CompletionError};

/// Default request timeout; a hung endpoint must not block a handler forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an error body is kept in [`CompletionError::UpstreamStatus`].
const ERROR_BODY_MAX_CHARS: usize = 400;

/// Connection settings for one deployment endpoint. Loaded once at startup; immutable.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub api_version: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_version: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_version: api_version.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL. The trailing slash before the query string is part of the
    /// endpoint contract and must not be dropped.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/deployments/{}/chat/completions/?api-version={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_version
        )
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// reqwest-based [`CompletionClient`] for one configured deployment.
#[derive(Clone)]
pub struct AzureCompletionClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl AzureCompletionClient {
    /// Builds the client with the config's timeout applied at the HTTP client level.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for AzureCompletionClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn submit(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = self.config.completions_url();
        let request = ChatRequest {
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(url = %url, model = %self.config.model, "submitting completion request");

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_MAX_CHARS).collect();
            warn!(status = status.as_u16(), body = %body, "completion endpoint returned error status");
            return Err(CompletionError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("empty choices".to_string()))?;

        info!(reply_len = content.len(), "completion received");
        Ok(content)
    }
}
