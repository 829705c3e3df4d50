//! # Domain Layer
//!
//! Conversation models, the grounding dataset and the error taxonomy.
//! This layer is independent of HTTP clients and servers.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
