//! # Routing Module
//!
//! Decides which agent answers a chat query.
//!
//! ## Components
//! - `agent`: The closed agent enumeration
//! - `prefix`: Job-analysis lead-in detection
//! - `keywords`: Weighted keyword scoring
//! - `delegator`: Model-backed classification
//! - `router`: Tier orchestration

pub mod agent;
pub mod decision;
pub mod delegator;
pub mod keywords;
pub mod prefix;
pub mod router;

pub use agent::Agent;
pub use decision::{RouteDecision, RouteTier};
pub use delegator::{LlmClassifier, QueryClassifier};
pub use router::QueryRouter;
