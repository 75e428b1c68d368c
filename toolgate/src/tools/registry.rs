//! Tool registry.

use super::{ExecutionTable, ToolDefinition};
use crate::errors::RegistryError;
use std::collections::HashMap;
use tracing::warn;

/// Read-only mapping from tool name to definition.
///
/// Built once at startup through [`ToolRegistry::builder`]; building checks
/// that every confirm-required tool has an approved executor.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Whether the named tool needs a human decision.
    ///
    /// Unknown tools report `false`.
    #[must_use]
    pub fn requires_confirmation(&self, name: &str) -> bool {
        self.lookup(name)
            .is_some_and(ToolDefinition::requires_confirmation)
    }

    /// Lists tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterates over the definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    /// Returns the number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Describes every tool for the completion endpoint.
    #[must_use]
    pub fn describe(&self) -> Vec<serde_json::Value> {
        self.tools.iter().map(ToolDefinition::to_function_spec).collect()
    }
}

/// Collects tool definitions before validation.
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistryBuilder {
    /// Adds a tool.
    #[must_use]
    pub fn tool(mut self, definition: ToolDefinition) -> Self {
        self.tools.push(definition);
        self
    }

    /// Validates the definitions against the execution table.
    ///
    /// Fails on duplicate names and on confirm-required tools with no
    /// approved executor. Table entries that no confirm-required tool uses
    /// are only logged.
    pub fn build(self, executions: &ExecutionTable) -> Result<ToolRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.tools.len());

        for (i, tool) in self.tools.iter().enumerate() {
            if index.insert(tool.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateTool {
                    name: tool.name.clone(),
                });
            }
            if tool.requires_confirmation() && !executions.contains(&tool.name) {
                return Err(RegistryError::MissingExecution {
                    name: tool.name.clone(),
                });
            }
        }

        for name in executions.names() {
            let used = index
                .get(&name)
                .is_some_and(|&i| self.tools[i].requires_confirmation());
            if !used {
                warn!(tool = %name, "Approved executor has no confirm-required tool");
            }
        }

        Ok(ToolRegistry {
            tools: self.tools,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{executor_fn, ToolExecutor};
    use serde_json::json;
    use std::sync::Arc;

    fn noop() -> Arc<dyn ToolExecutor> {
        executor_fn("noop", |_, _| async { Ok::<_, anyhow::Error>(json!(null)) })
    }

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::builder().build(&ExecutionTable::new()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_build_and_lookup() {
        let executions = ExecutionTable::new().with("getWeatherInformation", noop());
        let registry = ToolRegistry::builder()
            .tool(ToolDefinition::confirm("getWeatherInformation"))
            .tool(ToolDefinition::auto("getLocalTime", noop()))
            .build(&executions)
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["getWeatherInformation", "getLocalTime"]);
        assert!(registry.requires_confirmation("getWeatherInformation"));
        assert!(!registry.requires_confirmation("getLocalTime"));
        assert!(!registry.requires_confirmation("unknown"));
        assert!(registry.lookup("unknown").is_none());
    }

    #[test]
    fn test_missing_execution_is_fatal() {
        let err = ToolRegistry::builder()
            .tool(ToolDefinition::confirm("getPersuasiveCopy"))
            .build(&ExecutionTable::new())
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::MissingExecution {
                name: "getPersuasiveCopy".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_tool() {
        let err = ToolRegistry::builder()
            .tool(ToolDefinition::auto("getLocalTime", noop()))
            .tool(ToolDefinition::auto("getLocalTime", noop()))
            .build(&ExecutionTable::new())
            .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateTool { .. }));
    }

    #[test]
    fn test_unused_execution_is_not_fatal() {
        let executions = ExecutionTable::new().with("getLocalTime", noop());
        let registry = ToolRegistry::builder()
            .tool(ToolDefinition::auto("getLocalTime", noop()))
            .build(&executions);

        assert!(registry.is_ok());
    }

    #[test]
    fn test_describe() {
        let executions = ExecutionTable::new().with("getWeatherInformation", noop());
        let registry = ToolRegistry::builder()
            .tool(
                ToolDefinition::confirm("getWeatherInformation")
                    .with_description("show the weather in a given city to the user"),
            )
            .build(&executions)
            .unwrap();

        let specs = registry.describe();
        assert_eq!(specs.len(), 1);
        assert_eq!(
            specs[0]["function"]["description"],
            "show the weather in a given city to the user"
        );
    }
}
