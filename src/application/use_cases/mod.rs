mod build_conversation;
mod dispatch_chat;

pub use build_conversation::*;
pub use dispatch_chat::*;
