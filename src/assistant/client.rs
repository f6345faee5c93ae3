use crate::assistant::{parse_answer, require_query, AssistantError};
use crate::config::DEFAULT_GENERATION_TIMEOUT;
use crate::generation::StructuredGenerator;
use crate::prompt::assistant::client_chat_request;
use std::sync::Arc;
use std::time::Duration;

/// Answers client questions about routes, savings and transfers.
///
/// Has no access to live transaction data; status questions are answered
/// by pointing the client at their dashboard.
pub struct ClientAssistant {
    generator: Arc<dyn StructuredGenerator>,
    timeout: Duration,
}

impl ClientAssistant {
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn ask(&self, query: &str) -> Result<String, AssistantError> {
        let query = require_query(query)?;
        let generator = self.generator.name();
        let request = client_chat_request(query);

        let value = tokio::time::timeout(self.timeout, self.generator.generate(&request))
            .await
            .map_err(|_| AssistantError::TimedOut { generator })?
            .map_err(|source| AssistantError::Generation { generator, source })?;

        parse_answer(value)
    }
}
