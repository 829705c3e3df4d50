use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ChatProvider;
use crate::domain::{Completion, DomainError, Message, ModelParams, ProviderSelection};

/// Offline [`ChatProvider`] for `--mock-providers` and tests.
///
/// Replies with a canned HTML snippet and fixed token counts. Can be told to
/// fail every call, or to remember the last conversation it was given.
pub struct MockChatProvider {
    selection: ProviderSelection,
    model: String,
    reply: Option<String>,
    usage: (u64, u64, Option<u64>),
    fail: bool,
    record: bool,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<Message>>>,
}

impl MockChatProvider {
    pub fn new(selection: ProviderSelection) -> Self {
        let model = match selection {
            ProviderSelection::Primary => "mock-primary",
            ProviderSelection::Secondary => "mock-secondary",
        };
        Self {
            selection,
            model: model.to_string(),
            reply: None,
            usage: (10, 5, None),
            fail: false,
            record: false,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    pub fn with_usage(mut self, prompt: u64, completion: u64, total: Option<u64>) -> Self {
        self.usage = (prompt, completion, total);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn recording(mut self) -> Self {
        self.record = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.last_messages
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn submit(
        &self,
        messages: &[Message],
        params: &ModelParams,
    ) -> Result<Completion, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.record {
            if let Ok(mut guard) = self.last_messages.lock() {
                *guard = Some(messages.to_vec());
            }
        }

        if self.fail {
            return Err(DomainError::provider(format!(
                "{}: simulated upstream failure",
                self.model
            )));
        }

        let reply = match &self.reply {
            Some(reply) => reply.clone(),
            None => {
                let prompt = messages.last().map(|m| m.content()).unwrap_or_default();
                format!("<p>Mock reply to: <strong>{prompt}</strong></p>\n<br>")
            }
        };

        let (prompt_tokens, completion_tokens, total) = self.usage;
        Ok(Completion::new(
            reply,
            params.model.clone(),
            prompt_tokens,
            completion_tokens,
            total,
        ))
    }

    fn selection(&self) -> ProviderSelection {
        self.selection
    }

    fn model(&self) -> &str {
        &self.model
    }
}
