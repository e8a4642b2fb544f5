//! LlmClient trait and the scripted mock used in tests

use async_trait::async_trait;

use super::error::LlmError;
use super::types::{CompletionRequest, CompletionResponse};

/// Capability interface for the external reasoning service
///
/// One call = one completion; the orchestrator owns the turn loop and does
/// not retry a failed call within a turn.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one completion against the provider
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

pub mod mock {
    //! Scripted client for unit and integration tests

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::super::types::{CompletionRequest, CompletionResponse};
    use super::{LlmClient, LlmError};

    /// Replays a fixed script of responses, one per `complete` call
    ///
    /// When the script runs out it keeps replaying the last entry, so a
    /// single scripted tool call can drive the engine into its iteration
    /// bound. Received requests are recorded for assertions.
    pub struct MockLlmClient {
        script: Mutex<VecDeque<Result<CompletionResponse, String>>>,
        last: Mutex<Option<Result<CompletionResponse, String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        /// Create a mock replaying the given responses in order
        pub fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                script: Mutex::new(responses.into_iter().map(Ok).collect()),
                last: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock that fails every call with the given message
        pub fn failing(message: impl Into<String>) -> Self {
            let message = message.into();
            Self {
                script: Mutex::new(VecDeque::new()),
                last: Mutex::new(Some(Err(message))),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Number of `complete` calls received so far
        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// Snapshot of the requests received so far
        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request);

            let next = {
                let mut script = self.script.lock().unwrap();
                script.pop_front()
            };

            let entry = match next {
                Some(entry) => {
                    *self.last.lock().unwrap() = Some(clone_entry(&entry));
                    entry
                }
                None => match &*self.last.lock().unwrap() {
                    Some(entry) => clone_entry(entry),
                    None => Ok(CompletionResponse::text("")),
                },
            };

            entry.map_err(LlmError::InvalidResponse)
        }
    }

    fn clone_entry(entry: &Result<CompletionResponse, String>) -> Result<CompletionResponse, String> {
        match entry {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(message.clone()),
        }
    }

}
