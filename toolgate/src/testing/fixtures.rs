//! Conversation fixtures.

use crate::chat::{Decision, Message, MessagePart, ToolInvocation};
use crate::utils::generate_call_id;

/// Creates a confirm-required call the human has answered.
#[must_use]
pub fn pending_confirmation(
    tool_call_id: impl Into<String>,
    tool_name: impl Into<String>,
    args: serde_json::Value,
    decision: Decision,
) -> ToolInvocation {
    ToolInvocation::call(tool_call_id, tool_name, args).answered(decision)
}

/// Builds a conversation ending in an assistant turn.
#[derive(Debug, Default)]
pub struct TestTurn {
    history: Vec<Message>,
    parts: Vec<MessagePart>,
}

impl TestTurn {
    /// Starts a conversation with one user message.
    #[must_use]
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            history: vec![Message::user(user_text)],
            parts: Vec::new(),
        }
    }

    /// Adds a text part to the assistant turn.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(MessagePart::text(text));
        self
    }

    /// Adds a tool invocation to the assistant turn.
    #[must_use]
    pub fn invocation(mut self, invocation: ToolInvocation) -> Self {
        self.parts.push(MessagePart::ToolInvocation {
            tool_invocation: invocation,
        });
        self
    }

    /// Adds a call awaiting execution, with a generated id.
    #[must_use]
    pub fn call(self, tool_name: impl Into<String>, args: serde_json::Value) -> Self {
        self.invocation(ToolInvocation::call(generate_call_id(), tool_name, args))
    }

    /// Adds an answered confirmation.
    #[must_use]
    pub fn answered(
        self,
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: serde_json::Value,
        decision: Decision,
    ) -> Self {
        self.invocation(pending_confirmation(tool_call_id, tool_name, args, decision))
    }

    /// Finishes the conversation.
    #[must_use]
    pub fn build(self) -> Vec<Message> {
        let mut messages = self.history;
        let mut assistant = Message::assistant("");
        assistant.parts = self.parts;
        messages.push(assistant);
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_builder() {
        let messages = TestTurn::new("what's the weather?")
            .text("Checking")
            .answered("c1", "getWeatherInformation", json!({"city": "Porto"}), Decision::Yes)
            .build();

        assert_eq!(messages.len(), 2);
        let last = &messages[1];
        assert_eq!(last.parts.len(), 2);
        let invocation = last.parts[1].as_tool_invocation().unwrap();
        assert_eq!(invocation.pending_decision(), Some(Decision::Yes));
    }
}
