mod chat_provider;

pub use chat_provider::*;
