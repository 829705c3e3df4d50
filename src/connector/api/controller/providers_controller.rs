use crate::domain::{ProviderSelection, MAX_OUTPUT_TOKENS};

use super::super::Container;

pub struct ProvidersController<'a> {
    container: &'a Container,
}

impl<'a> ProvidersController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn list(&self) -> String {
        let mut output = String::from("Configured providers\n====================\n");
        for selection in [ProviderSelection::Primary, ProviderSelection::Secondary] {
            let provider = self.container.provider(selection);
            output.push_str(&format!(
                "{:<10} {:<8} model: {} (max {} output tokens)\n",
                selection.as_str(),
                provider.selection().label(),
                provider.model(),
                MAX_OUTPUT_TOKENS
            ));
        }
        if self.container.mock_providers() {
            output.push_str("\nMock providers are active; no upstream calls are made.\n");
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::api::ContainerConfig;

    #[test]
    fn test_lists_each_provider_with_its_label() {
        let container = Container::new(ContainerConfig {
            mock_providers: true,
        });
        let output = ProvidersController::new(&container).list();

        assert!(output.contains("primary    OPENAI   model: mock-primary"));
        assert!(output.contains("secondary  MISTRAL  model: mock-secondary"));
        assert!(output.contains("Mock providers are active"));
    }
}
