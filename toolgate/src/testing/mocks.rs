//! Mock collaborators for testing.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::completion::{CompletionClient, CompletionRequest};
use crate::errors::{CompletionError, ToolError};
use crate::tools::{ToolContext, ToolExecutor};

/// One recorded executor call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Id of the tool call.
    pub tool_call_id: String,
    /// Arguments the executor received.
    pub args: serde_json::Value,
}

/// An executor that records calls and returns a configurable result.
#[derive(Debug)]
pub struct MockExecutor {
    result: Mutex<serde_json::Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockExecutor {
    /// Creates an executor returning `result`.
    #[must_use]
    pub fn new(result: serde_json::Value) -> Self {
        Self {
            result: Mutex::new(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets the result to return.
    pub fn set_result(&self, result: serde_json::Value) {
        *self.result.lock() = result;
    }

    /// Returns the number of times the executor ran.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl ToolExecutor for MockExecutor {
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        self.calls.lock().push(RecordedCall {
            tool_call_id: ctx.tool_call_id().to_string(),
            args,
        });
        Ok(self.result.lock().clone())
    }
}

/// An executor that always fails.
#[derive(Debug)]
pub struct FailingExecutor {
    name: String,
    error: String,
    calls: Mutex<usize>,
}

impl FailingExecutor {
    /// Creates a failing executor.
    #[must_use]
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
            calls: Mutex::new(0),
        }
    }

    /// Returns the number of times the executor ran.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl ToolExecutor for FailingExecutor {
    async fn execute(
        &self,
        _args: serde_json::Value,
        _ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        *self.calls.lock() += 1;
        Err(ToolError::execution_failed(&self.name, &self.error))
    }
}

/// A completion client with a scripted answer.
#[derive(Debug)]
pub struct MockCompletion {
    answer: Result<String, CompletionError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletion {
    /// Creates a client that always answers `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            answer: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client that always fails with `error`.
    #[must_use]
    pub fn failing(error: CompletionError) -> Self {
        Self {
            answer: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().push(request);
        self.answer.clone()
    }
}
