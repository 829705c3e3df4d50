use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::application::ChatProvider;
use crate::domain::{Completion, DomainError, Message, ModelParams, ProviderSelection};

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

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
    content: Option<MessageContent>,
}

/// Mistral returns either a plain string or a list of typed chunks.
#[derive(Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Chunks(Vec<ContentChunk>),
}

#[derive(Deserialize)]
struct ContentChunk {
    #[serde(default)]
    text: Option<String>,
}

impl MessageContent {
    fn into_text(self) -> String {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Chunks(chunks) => chunks.into_iter().filter_map(|c| c.text).collect(),
        }
    }
}

/// Usage counters under either the REST (snake_case) or SDK (camelCase) names.
#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default, alias = "promptTokens")]
    prompt_tokens: u64,
    #[serde(default, alias = "completionTokens")]
    completion_tokens: u64,
    #[serde(default, alias = "totalTokens")]
    total_tokens: Option<u64>,
}

/// Secondary provider: the Mistral Chat Completion API.
///
/// | Variable           | Default                  |
/// |--------------------|--------------------------|
/// | `MISTRAL_BASE_URL` | `https://api.mistral.ai` |
/// | `MISTRAL_API_KEY`  | `""` (empty)             |
pub struct MistralProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl MistralProvider {
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
            std::env::var("MISTRAL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let key = std::env::var("MISTRAL_API_KEY").unwrap_or_default();
        if key.is_empty() {
            warn!("MISTRAL_API_KEY is not set; Mistral requests will be rejected upstream");
        }
        Self::new(key, DEFAULT_MODEL, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_completion(body: &str, model: &str) -> Result<Completion, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("MistralProvider: failed to parse response: {e}"))
        })?;

        let reply = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("MistralProvider: response has no choices"))?
            .message
            .content
            .map(MessageContent::into_text)
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
impl ChatProvider for MistralProvider {
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

        info!("Calling Mistral model {} ({} messages)", params.model, messages.len());

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("MistralProvider: request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::provider(format!("MistralProvider: failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("MistralProvider: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "MistralProvider: API returned {status}"
            )));
        }

        let completion = Self::parse_completion(&body, &params.model)?;

        info!(
            "Mistral success - model: {}, tokens: {} (input: {}, output: {})",
            completion.model(),
            completion.total_tokens(),
            completion.prompt_tokens(),
            completion.completion_tokens()
        );

        Ok(completion)
    }

    fn selection(&self) -> ProviderSelection {
        ProviderSelection::Secondary
    }

    fn model(&self) -> &str {
        &self.model
    }
}
