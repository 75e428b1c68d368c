//! Conversation data model.
//!
//! This module provides:
//! - Messages and their ordered parts
//! - Tool invocation parts and their lifecycle states
//! - The human decision type carried by pending confirmations

mod decision;
mod message;

pub use decision::Decision;
pub use message::{InvocationState, Message, MessagePart, Role, ToolInvocation};
