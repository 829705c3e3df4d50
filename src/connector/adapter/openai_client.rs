use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::application::ChatProvider;
use crate::domain::{Completion, DomainError, Message, ModelParams, ProviderSelection};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: Option<u64>,
}

/// Primary provider: the OpenAI Chat Completions API.
///
/// Configuration comes from the environment:
///
/// | Variable          | Default                  |
/// |-------------------|--------------------------|
/// | `OPENAI_BASE_URL` | `https://api.openai.com` |
/// | `OPENAI_API_KEY`  | `""` (empty)             |
///
/// The client carries no timeout of its own; reqwest's defaults apply.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn from_env() -> Self {
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if key.is_empty() {
            warn!("OPENAI_API_KEY is not set; OpenAI requests will be rejected upstream");
        }
        Self::new(key, DEFAULT_MODEL, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_completion(body: &str, model: &str) -> Result<Completion, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("OpenAiProvider: failed to parse response: {e}"))
        })?;

        if let Some(reported) = api_response.model.as_deref() {
            debug!("OpenAI reported model {reported}");
        }

        let reply = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("OpenAiProvider: response has no choices"))?
            .message
            .content
            .unwrap_or_default();

        let usage = api_response.usage.unwrap_or_default();
        Ok(Completion::new(
            reply,
            model,
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
        ))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn submit(
        &self,
        messages: &[Message],
        params: &ModelParams,
    ) -> Result<Completion, DomainError> {
        let request = ApiRequest {
            model: &params.model,
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role().as_str(),
                    content: m.content(),
                })
                .collect(),
            max_tokens: params.max_tokens,
        };

        info!("Calling OpenAI model {} ({} messages)", params.model, messages.len());

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("OpenAiProvider: request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::provider(format!("OpenAiProvider: failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("OpenAiProvider: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "OpenAiProvider: API returned {status}"
            )));
        }

        let completion = Self::parse_completion(&body, &params.model)?;

        info!(
            "OpenAI success - model: {}, tokens: {} (input: {}, output: {})",
            completion.model(),
            completion.total_tokens(),
            completion.prompt_tokens(),
            completion.completion_tokens()
        );

        Ok(completion)
    }

    fn selection(&self) -> ProviderSelection {
        ProviderSelection::Primary
    }

    fn model(&self) -> &str {
        &self.model
    }
}
