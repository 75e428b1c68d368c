//! Executor trait and the context handed to executors.

use crate::agent::Agent;
use crate::chat::Message;
use crate::errors::ToolError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Runs a tool with the arguments the model supplied.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Executes the tool.
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError>;
}

/// Per-call context passed explicitly to every executor.
#[derive(Clone)]
pub struct ToolContext {
    tool_call_id: String,
    agent: Option<Arc<dyn Agent>>,
    history: Arc<[Message]>,
}

impl ToolContext {
    /// Creates a context for one tool call.
    #[must_use]
    pub fn new(tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            agent: None,
            history: Arc::from(Vec::new()),
        }
    }

    /// Attaches the conversation's agent.
    #[must_use]
    pub fn with_agent(mut self, agent: Option<Arc<dyn Agent>>) -> Self {
        self.agent = agent;
        self
    }

    /// Attaches the conversation history as seen by the call.
    #[must_use]
    pub fn with_history(mut self, history: Arc<[Message]>) -> Self {
        self.history = history;
        self
    }

    /// Returns the id of the call being executed.
    #[must_use]
    pub fn tool_call_id(&self) -> &str {
        &self.tool_call_id
    }

    /// Returns the agent, if one is attached.
    #[must_use]
    pub fn agent(&self) -> Option<&Arc<dyn Agent>> {
        self.agent.as_ref()
    }

    /// Returns the agent or fails with [`ToolError::MissingAgent`].
    pub fn require_agent(&self, tool_name: &str) -> Result<&Arc<dyn Agent>, ToolError> {
        self.agent
            .as_ref()
            .ok_or_else(|| ToolError::missing_agent(tool_name))
    }

    /// Returns the conversation history.
    #[must_use]
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("tool_call_id", &self.tool_call_id)
            .field("has_agent", &self.agent.is_some())
            .field("history_len", &self.history.len())
            .finish()
    }
}

/// Executor backed by an async closure.
pub struct FnExecutor<F> {
    name: String,
    f: F,
}

#[async_trait]
impl<F, Fut> ToolExecutor for FnExecutor<F>
where
    F: Fn(serde_json::Value, ToolContext) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<serde_json::Value>> + Send,
{
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        (self.f)(args, ctx.clone())
            .await
            .map_err(|e| ToolError::execution_failed(&self.name, format!("{e:#}")))
    }
}

/// Wraps an async closure as a tool executor.
///
/// The closure may fail with any error; failures surface as
/// [`ToolError::ExecutionFailed`].
pub fn executor_fn<F, Fut>(name: impl Into<String>, f: F) -> Arc<dyn ToolExecutor>
where
    F: Fn(serde_json::Value, ToolContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<serde_json::Value>> + Send + 'static,
{
    Arc::new(FnExecutor {
        name: name.into(),
        f,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::InMemoryAgent;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_executor_success() {
        let executor = executor_fn("echo", |args, ctx| async move {
            Ok::<_, anyhow::Error>(json!({"args": args, "call": ctx.tool_call_id()}))
        });

        let result = executor
            .execute(json!({"x": 1}), &ToolContext::new("call_1"))
            .await
            .unwrap();
        assert_eq!(result, json!({"args": {"x": 1}, "call": "call_1"}));
    }

    #[tokio::test]
    async fn test_fn_executor_failure() {
        let executor = executor_fn("broken", |_, _| async {
            Err::<serde_json::Value, _>(anyhow::anyhow!("upstream timed out"))
        });

        let err = executor
            .execute(json!({}), &ToolContext::new("call_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
        assert_eq!(err.to_result_string(), "Error: upstream timed out");
    }

    #[test]
    fn test_require_agent() {
        let ctx = ToolContext::new("call_1");
        assert!(matches!(
            ctx.require_agent("scheduleTask"),
            Err(ToolError::MissingAgent { .. })
        ));

        let agent: Arc<dyn Agent> = Arc::new(InMemoryAgent::new());
        let ctx = ctx.with_agent(Some(agent));
        assert!(ctx.require_agent("scheduleTask").is_ok());
    }
}
