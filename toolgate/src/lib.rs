//! # Toolgate
//!
//! Human-in-the-loop tool confirmation for conversational agents.
//!
//! A language model requests named tools in the middle of a conversation.
//! Some tools run immediately; others wait for a human "yes" or "no". Toolgate
//! provides:
//!
//! - **Tool registry**: definitions tagged as auto-executing or
//!   confirm-required, validated against the approved executors at startup
//! - **Orchestration**: resolution of answered confirmations in the most
//!   recent turn, with one `tool_result` event per resolved call
//! - **Scheduling tools**: normalization of tagged schedule requests handed
//!   to the conversation's agent
//! - **Output sinks**: append-only event channels for transcripts and tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use toolgate::prelude::*;
//!
//! let toolset = default_toolset(completion)?;
//! let processor = ToolCallProcessor::from_toolset(toolset).with_agent(agent);
//!
//! let messages = processor.run_auto_calls(messages, &sink).await?;
//! let messages = processor.process(messages, &sink).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod agent;
pub mod chat;
pub mod completion;
pub mod config;
pub mod errors;
pub mod events;
pub mod observability;
pub mod orchestrator;
pub mod schedule;
pub mod testing;
pub mod tools;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::{Agent, InMemoryAgent, ScheduledTask};
    pub use crate::chat::{Decision, InvocationState, Message, MessagePart, Role, ToolInvocation};
    pub use crate::completion::{CompletionClient, CompletionRequest};
    pub use crate::config::{CompletionConfig, LoggingConfig, ToolflowConfig};
    pub use crate::errors::{
        AgentError, CompletionError, RegistryError, ScheduleError, ToolError, ToolflowError,
    };
    pub use crate::events::{
        ChannelSink, CollectingSink, LoggingSink, NoOpSink, OutputSink, StreamPart,
    };
    pub use crate::observability::init_tracing;
    pub use crate::orchestrator::ToolCallProcessor;
    pub use crate::schedule::{normalize, Normalized, ScheduleRequest, When};
    pub use crate::tools::builtin::default_toolset;
    pub use crate::tools::{
        executor_fn, ExecutionTable, ToolContext, ToolDefinition, ToolExecutor, ToolKind,
        ToolRegistry, Toolset,
    };

    #[cfg(feature = "openai")]
    pub use crate::completion::OpenAiCompletion;
}
