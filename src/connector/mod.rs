//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM providers (OpenAI, Mistral, and an offline mock)
//! - The HTTP chat endpoint (axum)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
