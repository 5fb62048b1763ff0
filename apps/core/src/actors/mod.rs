//! Actor layer around the hosted language model.
//!
//! - `llm`: handle + runner speaking the `generateContent` API
//! - `messages`: actor messages and errors
//! - `traits`: the `LlmActor` seam used by routing and chat

pub mod llm;
pub mod messages;
pub mod traits;
