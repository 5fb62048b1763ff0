//! Chat handling: agent personas, response shaping and the service that ties
//! routing, the model and the fallback responder together.

pub mod models;
pub mod personas;
pub mod service;
pub mod strategic_fit;

pub use models::{ChatRequest, ChatResponse, ViewportKind};
pub use personas::Personas;
pub use service::ChatService;
