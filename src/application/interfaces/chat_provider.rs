use async_trait::async_trait;

use crate::domain::{Completion, DomainError, Message, ModelParams, ProviderSelection};

/// Sends an assembled conversation to one LLM backend and returns its
/// normalized reply.
///
/// Implementors own transport, request shape and response parsing for their
/// vendor. Every failure (transport, HTTP status, undecodable body) is
/// reported as [`DomainError::ProviderError`].
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Submit `messages` in order. Exactly one upstream call, no retries.
    async fn submit(
        &self,
        messages: &[Message],
        params: &ModelParams,
    ) -> Result<Completion, DomainError>;

    /// The selection this provider answers for.
    fn selection(&self) -> ProviderSelection;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;
}
