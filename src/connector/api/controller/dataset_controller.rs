use anyhow::Result;

use crate::domain::GroundingDataset;

/// Prints the grounding dataset exactly as it is attached to conversations.
pub struct DatasetController;

impl DatasetController {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&self) -> Result<String> {
        let dataset = GroundingDataset::sample();
        let json = serde_json::to_string_pretty(dataset)?;
        Ok(format!(
            "{}\n\n{} rows, consistent: {}",
            json,
            dataset.row_count(),
            dataset.is_consistent()
        ))
    }
}

impl Default for DatasetController {
    fn default() -> Self {
        Self::new()
    }
}
