//! Error types for the toolgate crate.
//!
//! Most of these errors never reach the caller of the orchestrator: they are
//! rendered into the result of the tool invocation they belong to. The
//! taxonomy still matters for executors, registry construction and the agent
//! collaborator.

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for toolgate operations.
#[derive(Debug, Error)]
pub enum ToolflowError {
    /// A tool-related error.
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// The tool registry could not be built.
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// A schedule request was malformed.
    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    /// The agent collaborator failed.
    #[error("{0}")]
    Agent(#[from] AgentError),

    /// The completion endpoint failed.
    #[error("{0}")]
    Completion(#[from] CompletionError),

    /// Configuration was invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors related to tool lookup and execution.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// Tool was not found in the registry.
    #[error("Tool \"{name}\" is not registered")]
    NotFound {
        /// The tool name.
        name: String,
    },

    /// A confirm-required tool has no approved executor.
    #[error("No execute function found on tool")]
    MissingExecutor {
        /// The tool name.
        name: String,
    },

    /// Tool execution failed.
    #[error("{reason}")]
    ExecutionFailed {
        /// The tool name.
        name: String,
        /// The reason for failure.
        reason: String,
    },

    /// The arguments did not match the tool's parameter schema.
    #[error("Invalid arguments for tool {name}: {reason}")]
    InvalidArguments {
        /// The tool name.
        name: String,
        /// What was wrong with them.
        reason: String,
    },

    /// The schedule request carried by the arguments was not usable.
    #[error("{0}")]
    InvalidSchedule(#[from] ScheduleError),

    /// The tool needs an agent context and none was provided.
    #[error("No agent found")]
    MissingAgent {
        /// The tool name.
        name: String,
    },

    /// The same tool call id appeared twice in one turn.
    #[error("Duplicate tool call id \"{tool_call_id}\"")]
    DuplicateCallId {
        /// The repeated id.
        tool_call_id: String,
    },
}

impl ToolError {
    /// Creates a tool not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a missing executor error.
    #[must_use]
    pub fn missing_executor(name: impl Into<String>) -> Self {
        Self::MissingExecutor { name: name.into() }
    }

    /// Creates an execution failed error.
    #[must_use]
    pub fn execution_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing agent error.
    #[must_use]
    pub fn missing_agent(name: impl Into<String>) -> Self {
        Self::MissingAgent { name: name.into() }
    }

    /// Creates a duplicate call id error.
    #[must_use]
    pub fn duplicate_call_id(tool_call_id: impl Into<String>) -> Self {
        Self::DuplicateCallId {
            tool_call_id: tool_call_id.into(),
        }
    }

    /// Renders the error as the string stored in an invocation result.
    #[must_use]
    pub fn to_result_string(&self) -> String {
        format!("Error: {self}")
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::NotFound { name } => {
                map.insert("type".to_string(), serde_json::json!("ToolNotFound"));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::MissingExecutor { name } => {
                map.insert("type".to_string(), serde_json::json!("ToolMissingExecutor"));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::ExecutionFailed { name, reason } => {
                map.insert("type".to_string(), serde_json::json!("ToolExecutionError"));
                map.insert("name".to_string(), serde_json::json!(name));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::InvalidArguments { name, reason } => {
                map.insert("type".to_string(), serde_json::json!("ToolInvalidArguments"));
                map.insert("name".to_string(), serde_json::json!(name));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::InvalidSchedule(_) => {
                map.insert("type".to_string(), serde_json::json!("ToolInvalidSchedule"));
            }
            Self::MissingAgent { name } => {
                map.insert("type".to_string(), serde_json::json!("ToolMissingAgent"));
                map.insert("name".to_string(), serde_json::json!(name));
            }
            Self::DuplicateCallId { tool_call_id } => {
                map.insert("type".to_string(), serde_json::json!("ToolDuplicateCallId"));
                map.insert("tool_call_id".to_string(), serde_json::json!(tool_call_id));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Errors raised while building a tool registry.
///
/// These are startup errors: a registry that fails to build must not be
/// used to serve a conversation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two definitions share a name.
    #[error("Tool \"{name}\" is registered more than once")]
    DuplicateTool {
        /// The tool name.
        name: String,
    },

    /// A confirm-required tool has no entry in the execution table.
    #[error("Tool \"{name}\" requires confirmation but has no approved executor")]
    MissingExecution {
        /// The tool name.
        name: String,
    },
}

/// Errors raised while reading a schedule request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The `type` tag matched none of the known variants.
    #[error("not a valid schedule input: unrecognized type \"{tag}\"")]
    UnrecognizedVariant {
        /// The offending tag.
        tag: String,
    },

    /// The request had a known tag but a broken payload.
    #[error("not a valid schedule input: {reason}")]
    Malformed {
        /// What was wrong.
        reason: String,
    },

    /// A cron expression did not have five or six fields.
    #[error("invalid cron expression \"{expression}\"")]
    InvalidCron {
        /// The rejected expression.
        expression: String,
    },
}

/// Errors reported by the agent collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    /// No task exists with the given id.
    #[error("task {id} not found")]
    NotFound {
        /// The task id.
        id: String,
    },

    /// The agent refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The agent's backing store is not reachable.
    #[error("agent unavailable: {0}")]
    Unavailable(String),
}

/// Errors reported by a completion client.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// No API key was configured.
    #[error("no API key configured for the completion endpoint")]
    MissingApiKey,

    /// The request did not reach the endpoint.
    #[error("completion request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response could not be decoded.
    #[error("could not parse completion response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_to_dict() {
        let err = ToolError::not_found("my_tool");
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "ToolNotFound");
        assert_eq!(dict.get("name").unwrap(), "my_tool");
    }

    #[test]
    fn test_result_strings() {
        assert_eq!(
            ToolError::missing_executor("x").to_result_string(),
            "Error: No execute function found on tool"
        );
        assert_eq!(
            ToolError::not_found("ghost").to_result_string(),
            "Error: Tool \"ghost\" is not registered"
        );
        assert_eq!(
            ToolError::execution_failed("x", "boom").to_result_string(),
            "Error: boom"
        );
    }

    #[test]
    fn test_schedule_error_converts_into_tool_error() {
        let err: ToolError = ScheduleError::UnrecognizedVariant {
            tag: "weekly".to_string(),
        }
        .into();

        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_toolflow_error_from_registry_error() {
        let err: ToolflowError = RegistryError::MissingExecution {
            name: "getWeatherInformation".to_string(),
        }
        .into();

        assert!(matches!(err, ToolflowError::Registry(_)));
        assert!(err.to_string().contains("getWeatherInformation"));
    }
}
