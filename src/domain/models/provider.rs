use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cap on generated tokens for every provider call.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Which backend answers a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSelection {
    /// OpenAI chat completions.
    #[default]
    Primary,
    /// Mistral chat completions.
    Secondary,
}

impl ProviderSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSelection::Primary => "primary",
            ProviderSelection::Secondary => "secondary",
        }
    }

    /// Upper-case backend name shown to the caller (`OPENAI`, `MISTRAL`).
    pub fn label(&self) -> &'static str {
        match self {
            ProviderSelection::Primary => "OPENAI",
            ProviderSelection::Secondary => "MISTRAL",
        }
    }

    /// Accepts both the role names and the backend names. Anything else is
    /// answered by the primary backend.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "primary" | "openai" => ProviderSelection::Primary,
            "secondary" | "mistral" => ProviderSelection::Secondary,
            unknown => {
                warn!(
                    "Unknown provider '{}', defaulting to {}",
                    unknown,
                    ProviderSelection::Primary.label()
                );
                ProviderSelection::Primary
            }
        }
    }
}

impl std::fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request parameters handed to a provider alongside the messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelParams {
    pub model: String,
    pub max_tokens: u32,
}

impl ModelParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}
