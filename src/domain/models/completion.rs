use serde::{Deserialize, Serialize};

use super::ProviderSelection;

/// Normalized reply of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    reply_text: String,
    model: String,
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

impl Completion {
    /// `total_tokens` falls back to `prompt + completion` when the backend
    /// did not report one.
    pub fn new(
        reply_text: impl Into<String>,
        model: impl Into<String>,
        prompt_tokens: u64,
        completion_tokens: u64,
        total_tokens: Option<u64>,
    ) -> Self {
        Self {
            reply_text: reply_text.into(),
            model: model.into(),
            prompt_tokens,
            completion_tokens,
            total_tokens: total_tokens
                .unwrap_or(prompt_tokens.saturating_add(completion_tokens)),
        }
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    pub fn completion_tokens(&self) -> u64 {
        self.completion_tokens
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}

/// What the dispatch use case hands back to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    reply_text: String,
    model: String,
    provider: ProviderSelection,
    total_tokens: u64,
}

impl ChatOutcome {
    pub fn from_completion(completion: Completion, provider: ProviderSelection) -> Self {
        Self {
            total_tokens: completion.total_tokens,
            reply_text: completion.reply_text,
            model: completion.model,
            provider,
        }
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> ProviderSelection {
        self.provider
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}
