//! Approved executors for confirm-required tools.

use super::ToolExecutor;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a confirm-required tool name to the executor that runs once a human
/// says "yes".
#[derive(Clone, Default)]
pub struct ExecutionTable {
    executors: HashMap<String, Arc<dyn ToolExecutor>>,
}

impl ExecutionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an executor.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, executor: Arc<dyn ToolExecutor>) -> Self {
        self.insert(name, executor);
        self
    }

    /// Adds or replaces an executor.
    pub fn insert(&mut self, name: impl Into<String>, executor: Arc<dyn ToolExecutor>) {
        self.executors.insert(name.into(), executor);
    }

    /// Looks up the approved executor for a tool.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn ToolExecutor>> {
        self.executors.get(name)
    }

    /// Whether the table has an executor for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.executors.contains_key(name)
    }

    /// Lists the tool names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.executors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

impl std::fmt::Debug for ExecutionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionTable")
            .field("tools", &self.names())
            .finish()
    }
}
