use crate::generation::{GenerationError, GenerationRequest, StructuredGenerator};
use crate::prompt::{
    CLIENT_CHAT_PROMPT, ROUTE_OPTIMIZATION_PROMPT, TEAM_ANSWER_PROMPT, TEAM_TOOL_PROMPT,
};
use async_trait::async_trait;
use serde_json::{json, Value};

const OFFLINE_ANSWER: &str = "The assistant is running offline. For live transaction status, \
please check your dashboard or the transactions page.";

/// Deterministic generator that needs no network.
///
/// Route prompts are answered by copying the computed figures from the
/// prompt input into the declared shape with fixed descriptions. Assistant
/// prompts get keyword-based tool selection and templated answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StructuredGenerator for OfflineGenerator {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Value, GenerationError> {
        match request.prompt_name.as_str() {
            ROUTE_OPTIMIZATION_PROMPT => route_options(&request.input),
            TEAM_TOOL_PROMPT => Ok(select_tool(&request.input)),
            TEAM_ANSWER_PROMPT => Ok(summarize_tool_result(&request.input)),
            CLIENT_CHAT_PROMPT => Ok(json!({ "answer": OFFLINE_ANSWER })),
            other => Err(GenerationError::Configuration {
                message: format!("offline generator has no template for prompt '{}'", other),
            }),
        }
    }
}

fn field<'a>(input: &'a Value, key: &str) -> Result<&'a Value, GenerationError> {
    input.get(key).ok_or_else(|| GenerationError::InvalidResponse {
        message: format!("prompt input is missing '{}'", key),
    })
}

fn route_options(input: &Value) -> Result<Value, GenerationError> {
    let origin = field(input, "fromCountry")?.as_str().unwrap_or_default();
    let destination = field(input, "toCountry")?.as_str().unwrap_or_default();

    Ok(json!({
        "swift": {
            "name": "SWIFT",
            "cost": field(input, "swiftCost")?,
            "time": field(input, "swiftTime")?,
            "description": format!(
                "Traditional correspondent banking from {} to {}. Widely accepted but the most expensive and slowest option.",
                origin, destination
            ),
        },
        "stablecoin": {
            "name": "Stablecoin",
            "cost": field(input, "stablecoinCost")?,
            "time": field(input, "stablecoinTime")?,
            "description": "Settles on-chain in seconds with the lowest fees. The optimal route for most transfers.",
            "savingsPercentage": field(input, "stablecoinSavings")?,
        },
        "localRail": {
            "name": "Local Rail",
            "cost": field(input, "localRailCost")?,
            "time": field(input, "localRailTime")?,
            "description": "Uses domestic payment networks at both ends. Medium cost with same-day settlement.",
            "savingsPercentage": field(input, "localRailSavings")?,
        },
    }))
}

fn select_tool(input: &Value) -> Value {
    let query = input
        .get("query")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();

    if query.contains("task") {
        json!({ "tool": "getPendingTasks", "arguments": {} })
    } else if query.contains("revenue") || query.contains("fees") {
        let period = ["daily", "monthly", "quarterly", "annually"]
            .into_iter()
            .find(|p| query.contains(p));
        match period {
            Some(p) => json!({ "tool": "getRevenueFigures", "arguments": { "period": p } }),
            None => json!({ "tool": "getRevenueFigures", "arguments": {} }),
        }
    } else if query.contains("client") || query.contains("metric") || query.contains("feedback") {
        json!({ "tool": "getClientPerformanceMetrics", "arguments": {} })
    } else {
        json!({ "tool": null, "arguments": {} })
    }
}

fn summarize_tool_result(input: &Value) -> Value {
    match (input.get("tool").and_then(Value::as_str), input.get("toolResult")) {
        (Some(tool), Some(result)) => json!({
            "answer": format!("Here is what {} returned: {}", tool, result),
        }),
        _ => json!({
            "answer": "I can only help with pending tasks, client performance metrics, or revenue figures.",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, input: Value) -> GenerationRequest {
        GenerationRequest {
            prompt_name: name.to_string(),
            system: None,
            prompt: String::new(),
            input,
            output_schema: Value::Null,
        }
    }

    #[tokio::test]
    async fn test_tool_selection_by_keyword() {
        let g = OfflineGenerator::new();
        let out = g
            .generate(&request(TEAM_TOOL_PROMPT, json!({"query": "Quarterly revenue?"})))
            .await
            .unwrap();
        assert_eq!(out["tool"], "getRevenueFigures");
        assert_eq!(out["arguments"]["period"], "quarterly");

        let out = g
            .generate(&request(TEAM_TOOL_PROMPT, json!({"query": "What's the weather?"})))
            .await
            .unwrap();
        assert!(out["tool"].is_null());
    }

    #[tokio::test]
    async fn test_route_prompt_requires_figures() {
        let g = OfflineGenerator::new();
        let err = g
            .generate(&request(ROUTE_OPTIMIZATION_PROMPT, json!({"fromCountry": "USA"})))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_configuration_error() {
        let g = OfflineGenerator::new();
        let err = g.generate(&request("mystery", Value::Null)).await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration { .. }));
    }
}
