use crate::generation::GenerationRequest;
use crate::prompt::{schema_of, CLIENT_CHAT_PROMPT, TEAM_ANSWER_PROMPT, TEAM_TOOL_PROMPT};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

const CLIENT_SYSTEM: &str = "\
You are the FLUX AI Assistant, a professional financial assistant for clients of FLUX, \
a cross-border payment optimization platform. FLUX payments are typically 85% cheaper than \
traditional providers, settle in about 3 seconds, carry no hidden fees and run 24/7. Clients \
save 32% on average compared to traditional banking.

Payment routes:
- Stablecoin: the optimal route. Very low cost, settles in 3-10 seconds.
- Local Rail: medium cost, settles in 1-2 hours. Suits many local transfers.
- SWIFT: traditional banking. Expensive and slow (2-5 days).

You have no access to live transaction data. When asked about a transaction's status, \
direct the client to their dashboard or the transactions page.";

const TEAM_SYSTEM: &str = "\
You are the internal AI assistant for the FLUX team. Help team members retrieve \
business-critical information quickly and offer relevant insights, alerts or recommendations.

Available tools:
- getPendingTasks {assignedTo?}: pending tasks, optionally for one team member.
- getClientPerformanceMetrics {clientId?}: client count, volume processed, average savings, recent feedback.
- getRevenueFigures {period?}: fees collected and projected revenue for daily, monthly, quarterly or annually (default monthly).

If a question cannot be answered with these tools, say politely that you cannot help with \
that request. Keep answers concise.";

/// A free-text answer.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct AnswerPayload {
    /// The assistant's response to the query.
    pub answer: String,
}

/// The model's choice of tool for a team query.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct ToolSelectionPayload {
    /// Tool to call, or null when no tool applies.
    #[serde(default)]
    pub tool: Option<String>,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

pub fn client_chat_request(query: &str) -> GenerationRequest {
    GenerationRequest {
        prompt_name: CLIENT_CHAT_PROMPT.to_string(),
        system: Some(CLIENT_SYSTEM.to_string()),
        prompt: format!("User query: {}", query),
        input: json!({ "query": query }),
        output_schema: schema_of::<AnswerPayload>(),
    }
}

pub fn team_tool_request(query: &str) -> GenerationRequest {
    GenerationRequest {
        prompt_name: TEAM_TOOL_PROMPT.to_string(),
        system: Some(TEAM_SYSTEM.to_string()),
        prompt: format!(
            "Decide which tool, if any, answers this request. If it concerns tasks, work out \
             whether a specific team member is meant. If it concerns revenue, work out the period.\n\n\
             Request: {}",
            query
        ),
        input: json!({ "query": query }),
        output_schema: schema_of::<ToolSelectionPayload>(),
    }
}

pub fn team_answer_request(
    query: &str,
    tool: Option<&str>,
    tool_result: Option<&Value>,
) -> GenerationRequest {
    let context = match (tool, tool_result) {
        (Some(name), Some(result)) => format!("Result of {}:\n{}", name, result),
        _ => "No tool applies to this request.".to_string(),
    };
    GenerationRequest {
        prompt_name: TEAM_ANSWER_PROMPT.to_string(),
        system: Some(TEAM_SYSTEM.to_string()),
        prompt: format!("{}\n\nRequest: {}", context, query),
        input: json!({ "query": query, "tool": tool, "toolResult": tool_result }),
        output_schema: schema_of::<AnswerPayload>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_embeds_query() {
        let req = client_chat_request("How fast is stablecoin?");
        assert!(req.prompt.ends_with("How fast is stablecoin?"));
        assert!(req.system.as_deref().unwrap_or_default().contains("dashboard"));
        assert_eq!(req.output_schema["required"][0], "answer");
    }

    #[test]
    fn test_team_answer_includes_tool_result() {
        let result = json!({"totalFeesCollected": 15000});
        let req = team_answer_request("daily revenue?", Some("getRevenueFigures"), Some(&result));
        assert!(req.prompt.contains("Result of getRevenueFigures"));
        assert!(req.prompt.contains("15000"));
        assert_eq!(req.input["tool"], "getRevenueFigures");
    }

    #[test]
    fn test_tool_selection_defaults() {
        let payload: ToolSelectionPayload = serde_json::from_value(json!({"tool": null})).unwrap();
        assert_eq!(payload.tool, None);
        assert!(payload.arguments.is_null());
    }
}
