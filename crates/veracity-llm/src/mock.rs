//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns predefined responses
/// Perfect for testing without needing actual LLM access
#[derive(Debug)]
pub struct MockProvider {
    /// Name of this mock
    pub name: String,
    /// Canned responses (cycles through them)
    responses: Vec<String>,
    /// Current response index
    index: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
    /// Error message returned by every call, if set
    failure: Option<String>,
    /// Every request seen, in order
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            latency_ms: 0,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock that replays `responses` in order, then cycles
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(responses.into_iter().map(Into::into).collect())
    }

    /// Create a mock whose every call fails with a connection error
    pub fn failing(message: &str) -> Self {
        Self {
            name: "failing-mock".to_string(),
            failure: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }

    /// Create a smart mock that responds based on prompt content
    pub fn smart() -> Self {
        Self {
            name: "smart-mock".to_string(),
            ..Self::new(vec![])
        }
    }

    /// Simulate network latency on each call
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of `complete` calls made so far
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Snapshot of every request seen so far
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.lock_requests().clone()
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<LlmRequest>> {
        // A poisoned lock only means a test thread panicked mid-push.
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn generate_smart_response(&self, request: &LlmRequest) -> String {
        let prompt_lower = format!("{}\n{}", request.system, request.prompt).to_lowercase();

        if prompt_lower.contains("impartial judge") {
            return r#"{"label": "true", "confidence": 0.8, "rationale": "The verifier's citation of R1 directly confirms the headline; the challenger raised no contradicting evidence."}"#
                .to_string();
        }

        if prompt_lower.contains("control fact-checker") {
            return r#"{"label": "unverified", "confidence": 55, "rationale": "The evidence does not settle the headline on its own."}"#
                .to_string();
        }

        if prompt_lower.contains("verifier a") {
            return "Claims: The headline matches the cited report.\n\
                 Support (cite IDs): R1 states the announcement directly.\n\
                 Rebuttal targets (quote + ID): <rebut>\"no confirmation\"</rebut> is answered by R1.\n\
                 Constraints: ≤140 words, no sentence reuse."
                .to_string();
        }

        if prompt_lower.contains("challenger b") {
            return "Claims: The headline overstates what is confirmed.\n\
                 Support (cite IDs): R1 lacks independent corroboration.\n\
                 Rebuttal targets (quote + ID): <rebut>\"states the announcement\"</rebut> rests on R1 alone.\n\
                 Constraints: ≤140 words, no sentence reuse."
                .to_string();
        }

        format!(
            "I understand you're asking about: \"{}\"",
            request.prompt.chars().take(50).collect::<String>()
        )
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        self.failure.is_none()
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        self.lock_requests().push(request.clone());

        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }

        if let Some(message) = &self.failure {
            return Err(LlmError::ConnectionFailed(message.clone()));
        }

        let content = if self.responses.is_empty() {
            self.generate_smart_response(&request)
        } else {
            // Cycle through canned responses
            let idx = self.index.fetch_add(1, Ordering::Relaxed);
            self.responses[idx % self.responses.len()].clone()
        };

        Ok(LlmResponse {
            content,
            model: request.model.unwrap_or_else(|| self.name.clone()),
            tokens_used: Some((request.prompt.len() / 4) as u32 + 100),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
