//! Messages, parts and tool invocations.

use super::Decision;
use crate::utils::{generate_id, Timestamp};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human.
    User,
    /// The model.
    Assistant,
    /// Instructions injected by the host.
    System,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Who produced the message.
    pub role: Role,
    /// Plain text content, possibly empty.
    #[serde(default)]
    pub content: String,
    /// When the message was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Ordered parts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Creates a message with a fresh id and no parts.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role,
            content: content.into(),
            created_at: Some(chrono::Utc::now()),
            parts: Vec::new(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Appends a part.
    #[must_use]
    pub fn with_part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Appends a tool invocation part.
    #[must_use]
    pub fn with_invocation(self, invocation: ToolInvocation) -> Self {
        self.with_part(MessagePart::ToolInvocation {
            tool_invocation: invocation,
        })
    }

    /// Iterates over the tool invocations of this message, in order.
    pub fn tool_invocations(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.parts.iter().filter_map(MessagePart::as_tool_invocation)
    }
}

/// One element of a message's parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    /// A text segment.
    Text {
        /// The text.
        text: String,
    },
    /// A tool invocation requested by the model.
    ToolInvocation {
        /// The invocation.
        #[serde(rename = "toolInvocation")]
        tool_invocation: ToolInvocation,
    },
    /// Any other part type, preserved verbatim.
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl MessagePart {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns the tool invocation if this is one.
    #[must_use]
    pub fn as_tool_invocation(&self) -> Option<&ToolInvocation> {
        match self {
            Self::ToolInvocation { tool_invocation } => Some(tool_invocation),
            _ => None,
        }
    }

    /// Returns the tool invocation mutably if this is one.
    pub fn as_tool_invocation_mut(&mut self) -> Option<&mut ToolInvocation> {
        match self {
            Self::ToolInvocation { tool_invocation } => Some(tool_invocation),
            _ => None,
        }
    }
}

/// Lifecycle state of a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationState {
    /// Arguments are still streaming in.
    PartialCall,
    /// The call is complete and has no result yet.
    Call,
    /// A result (or a human decision) is attached.
    Result,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    /// Unique id of this call within the conversation.
    pub tool_call_id: String,
    /// The tool being invoked.
    pub tool_name: String,
    /// Arguments matching the tool's parameter schema.
    #[serde(default)]
    pub args: serde_json::Value,
    /// Lifecycle state.
    pub state: InvocationState,
    /// The result, or a decision string while the call awaits execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ToolInvocation {
    /// Creates a completed call with no result.
    #[must_use]
    pub fn call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            args,
            state: InvocationState::Call,
            result: None,
        }
    }

    /// Records the human's answer, turning the call into a pending confirmation.
    pub fn answer(&mut self, decision: Decision) {
        self.state = InvocationState::Result;
        self.result = Some(decision.to_result());
    }

    /// Builder form of [`ToolInvocation::answer`].
    #[must_use]
    pub fn answered(mut self, decision: Decision) -> Self {
        self.answer(decision);
        self
    }

    /// Attaches a real result.
    pub fn resolve(&mut self, result: serde_json::Value) {
        self.state = InvocationState::Result;
        self.result = Some(result);
    }

    /// Returns the decision if this call is a pending confirmation.
    ///
    /// A pending confirmation is in state `result` and carries exactly one of
    /// the decision strings.
    #[must_use]
    pub fn pending_decision(&self) -> Option<Decision> {
        if self.state != InvocationState::Result {
            return None;
        }
        self.result.as_ref().and_then(Decision::from_result)
    }

    /// Whether a real (non-decision) result is attached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state == InvocationState::Result && self.pending_decision().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_message() {
        let raw = json!({
            "id": "m1",
            "role": "assistant",
            "content": "",
            "createdAt": "2025-03-01T10:00:00Z",
            "parts": [
                {"type": "text", "text": "Sure"},
                {
                    "type": "tool-invocation",
                    "toolInvocation": {
                        "toolCallId": "call_1",
                        "toolName": "getWeatherInformation",
                        "args": {"city": "Lisbon"},
                        "state": "result",
                        "result": "yes"
                    }
                },
                {"type": "step-start"}
            ]
        });

        let message: Message = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.parts.len(), 3);
        assert!(matches!(message.parts[2], MessagePart::Other(_)));

        let invocation = message.tool_invocations().next().unwrap();
        assert_eq!(invocation.pending_decision(), Some(Decision::Yes));

        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(
            serde_json::to_value(InvocationState::PartialCall).unwrap(),
            json!("partial-call")
        );
    }

    #[test]
    fn test_pending_decision_requires_result_state() {
        let mut invocation = ToolInvocation::call("c1", "tool", json!({}));
        invocation.result = Some(json!("yes"));
        assert_eq!(invocation.pending_decision(), None);

        invocation.answer(Decision::No);
        assert_eq!(invocation.pending_decision(), Some(Decision::No));
        assert!(!invocation.is_resolved());

        invocation.resolve(json!("done"));
        assert!(invocation.is_resolved());
    }

    #[test]
    fn test_message_builders() {
        let message = Message::assistant("")
            .with_part(MessagePart::text("checking"))
            .with_invocation(ToolInvocation::call("c1", "getLocalTime", json!({"location": "Porto"})));

        assert_eq!(message.tool_invocations().count(), 1);
        assert!(message.created_at.is_some());
    }
}
