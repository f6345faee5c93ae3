//! Single-turn chat assistants for clients and for the internal team.

pub mod client;
pub mod team;
pub mod toolbox;

use crate::core::request::InvalidInputError;
use crate::generation::GenerationError;
use crate::prompt::assistant::AnswerPayload;
use thiserror::Error;

pub use client::ClientAssistant;
pub use team::{TeamAnswer, TeamAssistant};
pub use toolbox::{Tool, Toolbox};

/// Generic text shown to end users when the assistant cannot answer.
pub const ASSISTANT_USER_MESSAGE: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("generator '{generator}' failed: {source}")]
    Generation {
        generator: &'static str,
        #[source]
        source: GenerationError,
    },

    #[error("generator '{generator}' did not answer within the time limit")]
    TimedOut { generator: &'static str },

    #[error("assistant answer is malformed: {message}")]
    Malformed { message: String },

    #[error("tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },
}

impl AssistantError {
    /// Message safe to show an end user.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::InvalidInput(e) => e.to_string(),
            _ => ASSISTANT_USER_MESSAGE.to_string(),
        }
    }
}

pub(crate) fn require_query(query: &str) -> Result<&str, AssistantError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(InvalidInputError::EmptyQuery.into());
    }
    Ok(query)
}

pub(crate) fn parse_answer(value: serde_json::Value) -> Result<String, AssistantError> {
    let payload: AnswerPayload =
        serde_json::from_value(value).map_err(|e| AssistantError::Malformed {
            message: e.to_string(),
        })?;
    let answer = payload.answer.trim();
    if answer.is_empty() {
        return Err(AssistantError::Malformed {
            message: "answer is empty".to_string(),
        });
    }
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_query() {
        assert_eq!(require_query("  hi ").unwrap(), "hi");
        assert!(matches!(
            require_query("   "),
            Err(AssistantError::InvalidInput(InvalidInputError::EmptyQuery))
        ));
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(json!({"answer": " ok "})).unwrap(), "ok");
        assert!(parse_answer(json!({"answer": ""})).is_err());
        assert!(parse_answer(json!({"reply": "hi"})).is_err());
    }

    #[test]
    fn test_user_message_is_generic() {
        let err = AssistantError::Malformed {
            message: "internal detail".to_string(),
        };
        assert_eq!(err.user_message(), ASSISTANT_USER_MESSAGE);
    }
}
