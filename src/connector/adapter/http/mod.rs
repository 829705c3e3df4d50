mod payload;
mod server;

pub use payload::*;
pub use server::*;
