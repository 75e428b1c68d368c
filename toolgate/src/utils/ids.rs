//! Identifier generation for messages, tool calls and scheduled tasks.

use uuid::Uuid;

/// Generates a message or task id (UUID v7, time-ordered).
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Generates a tool call id in the `call_<hex>` shape models produce.
#[must_use]
pub fn generate_call_id() -> String {
    format!("call_{}", Uuid::new_v4().simple())
}
