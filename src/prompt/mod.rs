//! Prompt templates and the output shapes they declare.

pub mod assistant;
pub mod route;

use serde_json::Value;

pub use route::{PromptFormatter, RouteOptionPayload, RouteOptionsPayload, RoutePromptInput};

pub const ROUTE_OPTIMIZATION_PROMPT: &str = "payment_route_optimization";
pub const CLIENT_CHAT_PROMPT: &str = "client_chat";
pub const TEAM_TOOL_PROMPT: &str = "team_tool_selection";
pub const TEAM_ANSWER_PROMPT: &str = "team_answer";

/// JSON Schema for `T`, as a plain JSON value.
pub fn schema_of<T: schemars::JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}
