//! OpenAI-compatible chat-completions adapter (OpenAI, vLLM, llama.cpp,
//! Ollama's `/v1` endpoint and similar).

use crate::generation::{parse_model_text, GenerationError, GenerationRequest, StructuredGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`OpenAiCompatGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Transport-level timeout for one HTTP round trip.
    pub request_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeneratorConfig {
    /// Read settings from the environment, falling back to defaults.
    ///
    /// - `ROUTE_OPTIMIZER_BASE_URL`
    /// - `ROUTE_OPTIMIZER_API_KEY`, then `OPENAI_API_KEY`
    /// - `ROUTE_OPTIMIZER_MODEL`
    /// - `ROUTE_OPTIMIZER_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("ROUTE_OPTIMIZER_BASE_URL").unwrap_or(defaults.base_url),
            api_key: non_empty("ROUTE_OPTIMIZER_API_KEY").or_else(|| non_empty("OPENAI_API_KEY")),
            model: non_empty("ROUTE_OPTIMIZER_MODEL").unwrap_or(defaults.model),
            request_timeout: non_empty("ROUTE_OPTIMIZER_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

/// Structured generation over an OpenAI-compatible `/chat/completions` API.
pub struct OpenAiCompatGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl OpenAiCompatGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerationError::Configuration {
                message: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(GeneratorConfig::from_env())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(system.clone()),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: Some(request.prompt.clone()),
        });

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
            response_format: serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": request.prompt_name,
                    "schema": request.output_schema,
                },
            }),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    response_format: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl StructuredGenerator for OpenAiCompatGenerator {
    fn name(&self) -> &'static str {
        "openai-compat"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let mut req = self.client.post(&url).json(&self.chat_request(request));
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        log::debug!("POST {} (prompt '{}')", url, request.prompt_name);
        let response = req.send().await.map_err(|e| GenerationError::Network {
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let chat: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse {
                message: "response has no message content".to_string(),
            })?;

        parse_model_text(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("ROUTE_OPTIMIZER_BASE_URL", "http://localhost:11434/v1"),
            ("ROUTE_OPTIMIZER_MODEL", "llama3.1:8b"),
            ("ROUTE_OPTIMIZER_TIMEOUT_SECS", "5"),
            ("OPENAI_API_KEY", "sk-fallback"),
        ]));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.api_key.as_deref(), Some("sk-fallback"));
    }

    #[test]
    fn test_config_prefers_dedicated_key_and_ignores_blank_values() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("ROUTE_OPTIMIZER_API_KEY", "sk-dedicated"),
            ("OPENAI_API_KEY", "sk-fallback"),
            ("ROUTE_OPTIMIZER_MODEL", "  "),
            ("ROUTE_OPTIMIZER_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-dedicated"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_chat_request_carries_schema_and_system() {
        let generator = OpenAiCompatGenerator::new(GeneratorConfig::default()).unwrap();
        let request = GenerationRequest {
            prompt_name: "demo".to_string(),
            system: Some("be brief".to_string()),
            prompt: "hello".to_string(),
            input: serde_json::json!({}),
            output_schema: serde_json::json!({"type": "object"}),
        };
        let body = serde_json::to_value(generator.chat_request(&request)).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["response_format"]["json_schema"]["name"], "demo");
        assert_eq!(body["response_format"]["json_schema"]["schema"]["type"], "object");
        assert_eq!(body["stream"], false);
    }
}
