mod completion;
mod grounding;
mod message;
mod provider;
mod task_guidance;
mod turn;

pub use completion::*;
pub use grounding::*;
pub use message::*;
pub use provider::*;
pub use task_guidance::*;
pub use turn::*;
