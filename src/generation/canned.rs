use crate::generation::{GenerationError, GenerationRequest, StructuredGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Replays pre-programmed responses in order and records every request.
///
/// Intended for tests and demos that need full control over what the
/// "model" answers, including failures and slow responses.
///
/// # Examples
///
/// ```
/// use route_optimizer::generation::CannedGenerator;
///
/// let generator = CannedGenerator::new()
///     .with_value(serde_json::json!({"answer": "hello"}));
/// assert_eq!(generator.remaining(), 1);
/// ```
#[derive(Default)]
pub struct CannedGenerator {
    responses: Mutex<VecDeque<Result<serde_json::Value, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
}

impl CannedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, value: serde_json::Value) -> Self {
        self.push(Ok(value));
        self
    }

    pub fn with_error(self, error: GenerationError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sleep before answering, to exercise timeouts and cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(&self, response: Result<serde_json::Value, GenerationError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl StructuredGenerator for CannedGenerator {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        next.unwrap_or_else(|| {
            Err(GenerationError::Exhausted {
                prompt: request.prompt_name.clone(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> GenerationRequest {
        GenerationRequest {
            prompt_name: name.to_string(),
            system: None,
            prompt: String::new(),
            input: serde_json::Value::Null,
            output_schema: serde_json::Value::Null,
        }
    }

    #[tokio::test]
    async fn test_replays_in_order_then_exhausts() {
        let generator = CannedGenerator::new()
            .with_value(serde_json::json!(1))
            .with_error(GenerationError::Network {
                message: "down".to_string(),
            });

        assert_eq!(generator.generate(&request("a")).await.unwrap(), serde_json::json!(1));
        assert!(matches!(
            generator.generate(&request("b")).await,
            Err(GenerationError::Network { .. })
        ));
        assert_eq!(
            generator.generate(&request("c")).await,
            Err(GenerationError::Exhausted {
                prompt: "c".to_string()
            })
        );
        assert_eq!(generator.call_count(), 3);
        assert_eq!(generator.requests()[1].prompt_name, "b");
    }
}
