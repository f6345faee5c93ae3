use crate::assistant::toolbox::{Tool, Toolbox};
use crate::assistant::{parse_answer, require_query, AssistantError};
use crate::config::DEFAULT_GENERATION_TIMEOUT;
use crate::generation::{GenerationRequest, StructuredGenerator};
use crate::prompt::assistant::{team_answer_request, team_tool_request, ToolSelectionPayload};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// The team assistant's reply, with the tool it consulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnswer {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

/// Internal assistant that can look up tasks, client metrics and revenue.
///
/// One query costs at most two model calls: the first picks a tool (or
/// none), the second answers with the tool's output in context.
pub struct TeamAssistant {
    generator: Arc<dyn StructuredGenerator>,
    toolbox: Toolbox,
    timeout: Duration,
}

impl TeamAssistant {
    pub fn new(generator: Arc<dyn StructuredGenerator>, toolbox: Toolbox) -> Self {
        Self {
            generator,
            toolbox,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn ask(&self, query: &str) -> Result<TeamAnswer, AssistantError> {
        let query = require_query(query)?;

        let selection: ToolSelectionPayload = serde_json::from_value(
            self.call(&team_tool_request(query)).await?,
        )
        .map_err(|e| AssistantError::Malformed {
            message: e.to_string(),
        })?;

        let (tool, tool_result) = match selection.tool.as_deref().map(str::trim) {
            None | Some("") => (None, None),
            Some(name) => {
                let tool = Tool::from_name(name).ok_or_else(|| AssistantError::Malformed {
                    message: format!("unknown tool '{}'", name),
                })?;
                log::debug!("team assistant calling {}", tool);
                let result = self
                    .toolbox
                    .invoke(tool, &selection.arguments)
                    .map_err(|e| AssistantError::Tool {
                        tool: tool.to_string(),
                        message: e.to_string(),
                    })?;
                (Some(tool), Some(result))
            }
        };

        let tool_name = tool.map(|t| t.name());
        let answer = parse_answer(
            self.call(&team_answer_request(query, tool_name, tool_result.as_ref()))
                .await?,
        )?;

        Ok(TeamAnswer {
            answer,
            tool: tool_name.map(str::to_string),
        })
    }

    async fn call(&self, request: &GenerationRequest) -> Result<Value, AssistantError> {
        let generator = self.generator.name();
        tokio::time::timeout(self.timeout, self.generator.generate(request))
            .await
            .map_err(|_| AssistantError::TimedOut { generator })?
            .map_err(|source| AssistantError::Generation { generator, source })
    }
}
