//! Events written to the output stream.

use serde::{Deserialize, Serialize};

/// A structured event on the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamPart {
    /// A tool call received its result.
    ToolResult {
        /// The call the result belongs to.
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        /// The result payload.
        result: serde_json::Value,
    },
}

impl StreamPart {
    /// Creates a tool result event.
    #[must_use]
    pub fn tool_result(tool_call_id: impl Into<String>, result: serde_json::Value) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            result,
        }
    }

    /// Returns the event type tag.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ToolResult { .. } => "tool_result",
        }
    }

    /// Returns the tool call id the event refers to.
    #[must_use]
    pub fn tool_call_id(&self) -> &str {
        match self {
            Self::ToolResult { tool_call_id, .. } => tool_call_id,
        }
    }

    /// Encodes the event as a line of the AI data-stream protocol.
    ///
    /// Tool results use the `a` prefix followed by the JSON payload without
    /// the type tag.
    #[must_use]
    pub fn to_data_stream_line(&self) -> String {
        match self {
            Self::ToolResult {
                tool_call_id,
                result,
            } => {
                let payload = serde_json::json!({
                    "toolCallId": tool_call_id,
                    "result": result,
                });
                format!("a:{payload}\n")
            }
        }
    }
}
