pub mod client;
pub mod prompt;

pub use client::CoachClient;
pub use prompt::{build_messages, system_prompt, ChatMessage, CoachTarget, Role};
