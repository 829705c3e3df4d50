use serde::{Deserialize, Serialize};

use crate::application::ChatCommand;
use crate::domain::{ChatOutcome, ProviderSelection, TaskGuidanceContext, Turn};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The new user prompt. A missing prompt is treated as empty and rejected.
    #[serde(default)]
    pub prompt: String,

    /// Caller-held chat history, oldest first.
    #[serde(default)]
    pub messages: Vec<Turn>,

    /// `primary`/`openai` or `secondary`/`mistral` (default: primary)
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub is_task_guidance_active: bool,

    #[serde(default)]
    pub active_task: String,
}

impl ChatRequest {
    pub fn provider_selection(&self) -> ProviderSelection {
        self.provider
            .as_deref()
            .map(ProviderSelection::from_str)
            .unwrap_or_default()
    }

    pub fn into_command(self) -> ChatCommand {
        let provider = self.provider_selection();
        ChatCommand::new(self.prompt)
            .with_history(self.messages)
            .with_provider(provider)
            .with_task_guidance(TaskGuidanceContext::new(
                self.is_task_guidance_active,
                self.active_task,
            ))
    }
}

/// Successful reply (status 200).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub model_used: String,
    /// Upper-case backend name, e.g. `OPENAI`.
    pub provider: String,
    pub tokens_used: u64,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            reply: outcome.reply_text().to_string(),
            model_used: outcome.model().to_string(),
            provider: outcome.provider().label().to_string(),
            tokens_used: outcome.total_tokens(),
        }
    }
}

/// Failure reply (status 400 or 500). Never carries upstream error detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn provider_failure(provider: ProviderSelection) -> Self {
        Self {
            error: format!("Error calling {}", provider.label()),
        }
    }

    pub fn empty_prompt(provider: ProviderSelection) -> Self {
        Self {
            error: format!("Prompt must not be empty ({})", provider.label()),
        }
    }
}
