//! Test assertions for rewritten turns and emitted events.

use crate::chat::{Message, ToolInvocation};
use crate::events::{CollectingSink, StreamPart};

fn find_invocation<'a>(messages: &'a [Message], tool_call_id: &str) -> &'a ToolInvocation {
    let found = messages
        .last()
        .and_then(|m| {
            m.tool_invocations()
                .find(|inv| inv.tool_call_id == tool_call_id)
        });
    match found {
        Some(invocation) => invocation,
        None => panic!("No tool invocation with id '{tool_call_id}' in the last message"),
    }
}

/// Asserts that an invocation of the last turn carries `expected` as its result.
pub fn assert_result(messages: &[Message], tool_call_id: &str, expected: &serde_json::Value) {
    let invocation = find_invocation(messages, tool_call_id);
    assert!(
        invocation.is_resolved(),
        "Expected '{tool_call_id}' to be resolved, got {:?}",
        invocation.result
    );
    assert_eq!(
        invocation.result.as_ref(),
        Some(expected),
        "Unexpected result for '{tool_call_id}'"
    );
}

/// Asserts that an invocation of the last turn still awaits execution.
pub fn assert_pending(messages: &[Message], tool_call_id: &str) {
    let invocation = find_invocation(messages, tool_call_id);
    assert!(
        !invocation.is_resolved(),
        "Expected '{tool_call_id}' to be pending, got {:?}",
        invocation.result
    );
}

/// Asserts that a pass left the conversation untouched.
pub fn assert_unchanged(before: &[Message], after: &[Message]) {
    assert_eq!(before, after, "Expected the message list to be unchanged");
}

/// Asserts that the sink received exactly these events, in order.
pub fn assert_events(sink: &CollectingSink, expected: &[(&str, serde_json::Value)]) {
    let expected: Vec<StreamPart> = expected
        .iter()
        .map(|(id, result)| StreamPart::tool_result(*id, result.clone()))
        .collect();
    assert_eq!(sink.parts(), expected, "Unexpected tool_result events");
}

/// Asserts that the sink received nothing.
pub fn assert_no_events(sink: &CollectingSink) {
    assert!(
        sink.is_empty(),
        "Expected no events, got {:?}",
        sink.parts()
    );
}
