//! The tool-call processor.

use crate::agent::Agent;
use crate::chat::{Decision, InvocationState, Message, ToolInvocation};
use crate::errors::{ToolError, ToolflowError};
use crate::events::{OutputSink, StreamPart};
use crate::observability::SpanTimer;
use crate::tools::{ExecutionTable, ToolContext, ToolDefinition, ToolRegistry, Toolset};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result written when the human declines a tool call.
pub const DENIED_RESULT: &str = "Error: User denied access to tool execution";

/// Resolves tool invocations of the most recent turn.
///
/// Holds the read-only registry and execution table; the agent, when
/// attached, is handed to executors through their [`ToolContext`].
#[derive(Clone)]
pub struct ToolCallProcessor {
    registry: Arc<ToolRegistry>,
    executions: Arc<ExecutionTable>,
    agent: Option<Arc<dyn Agent>>,
}

impl ToolCallProcessor {
    /// Creates a processor.
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, executions: Arc<ExecutionTable>) -> Self {
        Self {
            registry,
            executions,
            agent: None,
        }
    }

    /// Creates a processor from a validated toolset.
    #[must_use]
    pub fn from_toolset(toolset: Toolset) -> Self {
        Self::new(Arc::new(toolset.registry), Arc::new(toolset.executions))
    }

    /// Attaches the conversation's agent.
    #[must_use]
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Resolves every pending confirmation of the last message.
    ///
    /// Returns the message list with the last message replaced by a copy
    /// holding the rewritten parts. One `tool_result` event is written per
    /// resolved confirmation, in part order. Executor failures become
    /// error-valued results; nothing escapes this call.
    pub async fn process(&self, mut messages: Vec<Message>, sink: &dyn OutputSink) -> Vec<Message> {
        let has_pending = messages
            .last()
            .is_some_and(|m| m.tool_invocations().any(|inv| inv.pending_decision().is_some()));
        if !has_pending {
            debug!("No pending confirmations");
            return messages;
        }

        let history: Arc<[Message]> = Arc::from(messages.as_slice());
        let Some(mut last) = messages.pop() else {
            return messages;
        };

        let mut seen = HashSet::new();
        for part in &mut last.parts {
            let Some(invocation) = part.as_tool_invocation_mut() else {
                continue;
            };

            let Some(decision) = invocation.pending_decision() else {
                if invocation.state == InvocationState::Result {
                    seen.insert(invocation.tool_call_id.clone());
                }
                debug!(
                    tool_call_id = %invocation.tool_call_id,
                    tool = %invocation.tool_name,
                    "Skipping invocation without a decision"
                );
                continue;
            };

            let result = if seen.insert(invocation.tool_call_id.clone()) {
                self.resolve_confirmation(invocation, decision, &history)
                    .await
            } else {
                warn!(tool_call_id = %invocation.tool_call_id, "Duplicate tool call id");
                error_value(&ToolError::duplicate_call_id(&invocation.tool_call_id))
            };

            invocation.resolve(result.clone());
            sink.write(StreamPart::tool_result(&invocation.tool_call_id, result))
                .await;
        }

        messages.push(last);
        messages
    }

    async fn resolve_confirmation(
        &self,
        invocation: &ToolInvocation,
        decision: Decision,
        history: &Arc<[Message]>,
    ) -> Value {
        let name = invocation.tool_name.as_str();

        let Some(definition) = self.registry.lookup(name) else {
            warn!(tool_call_id = %invocation.tool_call_id, tool = name, "Tool is not registered");
            return error_value(&ToolError::not_found(name));
        };

        if decision == Decision::No {
            info!(
                tool_call_id = %invocation.tool_call_id,
                tool = name,
                %decision,
                "Tool call denied"
            );
            return Value::String(DENIED_RESULT.to_string());
        }

        let Some(executor) = self.executions.lookup(name) else {
            warn!(tool_call_id = %invocation.tool_call_id, tool = name, "No approved executor");
            return error_value(&ToolError::missing_executor(name));
        };

        let timer = SpanTimer::start(name);
        let outcome = match definition.validate_args(&invocation.args) {
            Ok(()) => {
                executor
                    .execute(invocation.args.clone(), &self.context(invocation, history))
                    .await
            }
            Err(e) => Err(e),
        };
        let duration_ms = timer.finish();

        match outcome {
            Ok(value) => {
                info!(
                    tool_call_id = %invocation.tool_call_id,
                    tool = name,
                    %decision,
                    duration_ms,
                    "Tool call confirmed and executed"
                );
                warn_if_decision(&invocation.tool_call_id, name, &value);
                value
            }
            Err(e) => {
                warn!(
                    tool_call_id = %invocation.tool_call_id,
                    tool = name,
                    error = %e,
                    duration_ms,
                    "Tool execution failed"
                );
                error_value(&e)
            }
        }
    }

    /// Runs every auto-executing call of the last message.
    ///
    /// Invocations in state `call` whose tool is auto-executing are executed
    /// in part order and get their result attached; one `tool_result` event
    /// is written per executed call. Failures become error-valued results,
    /// except a missing agent, which is a host wiring error and is returned.
    pub async fn run_auto_calls(
        &self,
        mut messages: Vec<Message>,
        sink: &dyn OutputSink,
    ) -> Result<Vec<Message>, ToolflowError> {
        let has_auto = messages.last().is_some_and(|m| {
            m.tool_invocations()
                .any(|inv| self.auto_definition(inv).is_some())
        });
        if !has_auto {
            return Ok(messages);
        }

        let history: Arc<[Message]> = Arc::from(messages.as_slice());
        let Some(mut last) = messages.pop() else {
            return Ok(messages);
        };

        let mut seen = HashSet::new();
        for part in &mut last.parts {
            let Some(invocation) = part.as_tool_invocation_mut() else {
                continue;
            };
            let Some(definition) = self.auto_definition(invocation) else {
                continue;
            };

            let result = if seen.insert(invocation.tool_call_id.clone()) {
                self.execute_auto(definition, invocation, &history).await?
            } else {
                warn!(tool_call_id = %invocation.tool_call_id, "Duplicate tool call id");
                error_value(&ToolError::duplicate_call_id(&invocation.tool_call_id))
            };

            invocation.resolve(result.clone());
            sink.write(StreamPart::tool_result(&invocation.tool_call_id, result))
                .await;
        }

        messages.push(last);
        Ok(messages)
    }

    fn auto_definition(&self, invocation: &ToolInvocation) -> Option<&ToolDefinition> {
        if invocation.state != InvocationState::Call {
            return None;
        }
        self.registry
            .lookup(&invocation.tool_name)
            .filter(|d| !d.requires_confirmation())
    }

    async fn execute_auto(
        &self,
        definition: &ToolDefinition,
        invocation: &ToolInvocation,
        history: &Arc<[Message]>,
    ) -> Result<Value, ToolflowError> {
        let Some(executor) = definition.auto_executor() else {
            return Ok(error_value(&ToolError::missing_executor(&definition.name)));
        };

        let timer = SpanTimer::start(&definition.name);
        let outcome = match definition.validate_args(&invocation.args) {
            Ok(()) => {
                executor
                    .execute(invocation.args.clone(), &self.context(invocation, history))
                    .await
            }
            Err(e) => Err(e),
        };
        let duration_ms = timer.finish();

        match outcome {
            Ok(value) => {
                info!(
                    tool_call_id = %invocation.tool_call_id,
                    tool = %definition.name,
                    duration_ms,
                    "Tool executed"
                );
                warn_if_decision(&invocation.tool_call_id, &definition.name, &value);
                Ok(value)
            }
            Err(e @ ToolError::MissingAgent { .. }) => Err(e.into()),
            Err(e) => {
                warn!(
                    tool_call_id = %invocation.tool_call_id,
                    tool = %definition.name,
                    error = %e,
                    duration_ms,
                    "Tool execution failed"
                );
                Ok(error_value(&e))
            }
        }
    }

    /// Lists confirm-required invocations of the last message still waiting
    /// for a human decision.
    #[must_use]
    pub fn pending_confirmations<'a>(&self, messages: &'a [Message]) -> Vec<&'a ToolInvocation> {
        messages
            .last()
            .map(|m| {
                m.tool_invocations()
                    .filter(|inv| inv.state == InvocationState::Call)
                    .filter(|inv| self.registry.requires_confirmation(&inv.tool_name))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn context(&self, invocation: &ToolInvocation, history: &Arc<[Message]>) -> ToolContext {
        ToolContext::new(&invocation.tool_call_id)
            .with_agent(self.agent.clone())
            .with_history(Arc::clone(history))
    }
}

impl std::fmt::Debug for ToolCallProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallProcessor")
            .field("tools", &self.registry.names())
            .field("has_agent", &self.agent.is_some())
            .finish()
    }
}

/// Logs a result that reads as a pending decision on the wire.
///
/// A later pass cannot tell such a result from a human answer and would run
/// the tool again. Returns whether the warning fired.
pub(crate) fn warn_if_decision(tool_call_id: &str, tool: &str, value: &Value) -> bool {
    let Some(decision) = Decision::from_result(value) else {
        return false;
    };
    warn!(
        tool_call_id,
        tool,
        %decision,
        "Executor result equals a decision string; a later pass will treat it as pending"
    );
    true
}

fn error_value(error: &ToolError) -> Value {
    Value::String(error.to_result_string())
}
