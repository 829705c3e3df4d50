use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ChatCommand;
use crate::domain::{ChatOutcome, ProviderSelection, TaskGuidanceContext, Turn};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One-shot prompt from the command line. `history` points at a JSON
    /// array of turns in the same shape the front-end stores.
    pub async fn ask(
        &self,
        prompt: String,
        provider: String,
        task: Option<String>,
        history: Option<PathBuf>,
    ) -> Result<String> {
        let history = match history {
            Some(path) => load_history(&path)?,
            None => Vec::new(),
        };

        let task_guidance = match task {
            Some(task) => TaskGuidanceContext::active(task),
            None => TaskGuidanceContext::inactive(),
        };

        let command = ChatCommand::new(prompt)
            .with_history(history)
            .with_provider(ProviderSelection::from_str(&provider))
            .with_task_guidance(task_guidance);

        let use_case = self.container.dispatch_use_case();
        let outcome = use_case.execute(command).await?;

        Ok(format_outcome(&outcome))
    }
}

fn load_history(path: &Path) -> Result<Vec<Turn>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    let turns: Vec<Turn> = serde_json::from_str(&raw)
        .with_context(|| format!("History file {} is not a JSON array of turns", path.display()))?;
    Ok(turns)
}

fn format_outcome(outcome: &ChatOutcome) -> String {
    format!(
        "{}\n\n-- {} ({}), {} tokens",
        outcome.reply_text(),
        outcome.model(),
        outcome.provider().label(),
        outcome.total_tokens()
    )
}
