use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, DatasetController, ProvidersController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    dataset_controller: DatasetController,
    providers_controller: ProvidersController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            dataset_controller: DatasetController::new(),
            providers_controller: ProvidersController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask {
                prompt,
                provider,
                task,
                history,
            } => self.chat_controller.ask(prompt, provider, task, history).await,
            Commands::Dataset => self.dataset_controller.show(),
            Commands::Providers => Ok(self.providers_controller.list()),
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
