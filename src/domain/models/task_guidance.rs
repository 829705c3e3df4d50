use serde::{Deserialize, Serialize};

/// Optional modifier that swaps in the stricter step-by-step system prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGuidanceContext {
    active: bool,
    task_description: String,
}

impl TaskGuidanceContext {
    pub fn new(active: bool, task_description: impl Into<String>) -> Self {
        Self {
            active,
            task_description: task_description.into(),
        }
    }

    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(task_description: impl Into<String>) -> Self {
        Self::new(true, task_description)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn task_description(&self) -> &str {
        &self.task_description
    }
}
