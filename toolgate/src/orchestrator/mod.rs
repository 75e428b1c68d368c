//! Tool-call orchestration over a conversation turn.
//!
//! The host calls [`ToolCallProcessor::process`] once per assistant turn
//! before the turn is finalised. Every invocation the human has answered
//! with `"yes"` or `"no"` is resolved in positional order, rewritten in
//! place and reported on the output sink. Invocations still waiting for a
//! decision are left for a later pass.

mod processor;


pub use processor::{ToolCallProcessor, DENIED_RESULT};
