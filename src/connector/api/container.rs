use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatProvider, DispatchChatUseCase};
use crate::connector::adapter::{AppState, MistralProvider, MockChatProvider, OpenAiProvider};
use crate::domain::ProviderSelection;

pub struct ContainerConfig {
    /// Answer every request offline instead of calling OpenAI / Mistral.
    pub mock_providers: bool,
}

pub struct Container {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
    dispatch_use_case: Arc<DispatchChatUseCase>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let (primary, secondary): (Arc<dyn ChatProvider>, Arc<dyn ChatProvider>) =
            if config.mock_providers {
                debug!("Using mock chat providers");
                (
                    Arc::new(MockChatProvider::new(ProviderSelection::Primary)),
                    Arc::new(MockChatProvider::new(ProviderSelection::Secondary)),
                )
            } else {
                let openai = OpenAiProvider::from_env();
                let mistral = MistralProvider::from_env();
                debug!("OpenAI endpoint: {}", openai.url());
                debug!("Mistral endpoint: {}", mistral.url());
                (Arc::new(openai), Arc::new(mistral))
            };

        Self::with_providers(primary, secondary, config)
    }

    /// Wire explicit providers, e.g. clients pointed at a test server.
    pub fn with_providers(
        primary: Arc<dyn ChatProvider>,
        secondary: Arc<dyn ChatProvider>,
        config: ContainerConfig,
    ) -> Self {
        let dispatch_use_case = Arc::new(DispatchChatUseCase::new(
            primary.clone(),
            secondary.clone(),
        ));
        Self {
            primary,
            secondary,
            dispatch_use_case,
            config,
        }
    }

    pub fn dispatch_use_case(&self) -> Arc<DispatchChatUseCase> {
        self.dispatch_use_case.clone()
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.dispatch_use_case())
    }

    pub fn provider(&self, selection: ProviderSelection) -> Arc<dyn ChatProvider> {
        match selection {
            ProviderSelection::Primary => self.primary.clone(),
            ProviderSelection::Secondary => self.secondary.clone(),
        }
    }

    pub fn mock_providers(&self) -> bool {
        self.config.mock_providers
    }
}
