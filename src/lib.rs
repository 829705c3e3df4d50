pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatCommand, ChatProvider, ConversationBuilder, DispatchChatUseCase, GROUNDING_KEYWORDS,
    HISTORY_WINDOW,
};

pub use cli::Commands;

pub use connector::{
    app, serve, AppState, ChatRequest, ChatResponse, ErrorResponse, MistralProvider,
    MockChatProvider, OpenAiProvider,
};

pub use domain::{
    ChatOutcome, Completion, DomainError, GroundingDataset, Message, ModelParams,
    ProviderSelection, Role, TaskGuidanceContext, Turn, TurnKind, MAX_OUTPUT_TOKENS,
};
