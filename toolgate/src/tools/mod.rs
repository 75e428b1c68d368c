//! Tools the model can call.
//!
//! This module provides:
//! - Tool definitions with a tagged execution kind
//! - The registry and its startup validation
//! - The table of human-approved executors
//! - The built-in tools

pub mod builtin;
mod definitions;
mod executions;
mod executor;
mod registry;

pub use definitions::{ToolDefinition, ToolKind};
pub use executions::ExecutionTable;
pub use executor::{executor_fn, FnExecutor, ToolContext, ToolExecutor};
pub use registry::{ToolRegistry, ToolRegistryBuilder};

use crate::errors::RegistryError;

/// A validated registry together with its execution table.
#[derive(Debug, Clone)]
pub struct Toolset {
    /// The tool registry.
    pub registry: ToolRegistry,
    /// Approved executors for confirm-required tools.
    pub executions: ExecutionTable,
}

impl Toolset {
    /// Builds the registry against `executions` and pairs them.
    pub fn new(
        builder: ToolRegistryBuilder,
        executions: ExecutionTable,
    ) -> Result<Self, RegistryError> {
        let registry = builder.build(&executions)?;
        Ok(Self {
            registry,
            executions,
        })
    }
}
