use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::use_cases::build_conversation::ConversationBuilder;
use crate::application::ChatProvider;
use crate::domain::{
    ChatOutcome, DomainError, ModelParams, ProviderSelection, TaskGuidanceContext, Turn,
};

/// One chat request as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct ChatCommand {
    pub prompt: String,
    pub history: Vec<Turn>,
    pub provider: ProviderSelection,
    pub task_guidance: TaskGuidanceContext,
}

impl ChatCommand {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_provider(mut self, provider: ProviderSelection) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_task_guidance(mut self, task_guidance: TaskGuidanceContext) -> Self {
        self.task_guidance = task_guidance;
        self
    }
}

/// Builds the conversation for a prompt and sends it to exactly one of the
/// two configured providers.
pub struct DispatchChatUseCase {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
    builder: ConversationBuilder,
}

impl DispatchChatUseCase {
    pub fn new(primary: Arc<dyn ChatProvider>, secondary: Arc<dyn ChatProvider>) -> Self {
        Self {
            primary,
            secondary,
            builder: ConversationBuilder::new(),
        }
    }

    pub fn provider(&self, selection: ProviderSelection) -> &Arc<dyn ChatProvider> {
        match selection {
            ProviderSelection::Primary => &self.primary,
            ProviderSelection::Secondary => &self.secondary,
        }
    }

    pub async fn execute(&self, command: ChatCommand) -> Result<ChatOutcome, DomainError> {
        if command.prompt.trim().is_empty() {
            return Err(DomainError::invalid_input("prompt must not be empty"));
        }

        info!("Chat request started - provider: {}", command.provider.label());
        let start_time = Instant::now();

        let messages =
            self.builder
                .build(&command.prompt, &command.history, &command.task_guidance)?;

        let provider = self.provider(command.provider);
        let params = ModelParams::new(provider.model());
        let completion = provider.submit(&messages, &params).await?;

        info!(
            "Chat request finished - provider: {}, model: {}, {} tokens in {:.2}s",
            command.provider.label(),
            completion.model(),
            completion.total_tokens(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(ChatOutcome::from_completion(completion, provider.selection()))
    }
}
