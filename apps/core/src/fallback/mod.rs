//! Deterministic answers for when the model cannot be used.

pub mod responder;
pub mod tips;

pub use responder::{respond, ConfidenceTier, FallbackCategory};
pub use tips::no_match_reply;
