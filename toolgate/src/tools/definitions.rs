//! Tool definitions.

use super::ToolExecutor;
use crate::errors::ToolError;
use std::sync::Arc;

/// How a tool gets executed.
#[derive(Clone)]
pub enum ToolKind {
    /// Runs as soon as the model calls it.
    Auto(Arc<dyn ToolExecutor>),
    /// Needs a human "yes" before the approved executor runs.
    Confirm,
}

impl std::fmt::Debug for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto(_) => f.write_str("Auto"),
            Self::Confirm => f.write_str("Confirm"),
        }
    }
}

/// Definition of a tool the model can call.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// The tool name.
    pub name: String,
    /// Description shown to the model.
    pub description: String,
    /// JSON Schema of the arguments.
    pub parameters: serde_json::Value,
    /// Execution kind.
    pub kind: ToolKind,
}

impl ToolDefinition {
    /// Creates an auto-executing tool.
    #[must_use]
    pub fn auto(name: impl Into<String>, executor: Arc<dyn ToolExecutor>) -> Self {
        Self::with_kind(name, ToolKind::Auto(executor))
    }

    /// Creates a tool that requires human confirmation.
    #[must_use]
    pub fn confirm(name: impl Into<String>) -> Self {
        Self::with_kind(name, ToolKind::Confirm)
    }

    fn with_kind(name: impl Into<String>, kind: ToolKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
            kind,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, schema: serde_json::Value) -> Self {
        self.parameters = schema;
        self
    }

    /// Whether the tool waits for a human decision.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        matches!(self.kind, ToolKind::Confirm)
    }

    /// Returns the executor of an auto tool.
    #[must_use]
    pub fn auto_executor(&self) -> Option<&Arc<dyn ToolExecutor>> {
        match &self.kind {
            ToolKind::Auto(executor) => Some(executor),
            ToolKind::Confirm => None,
        }
    }

    /// Describes the tool in the OpenAI function-calling format.
    #[must_use]
    pub fn to_function_spec(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }

    /// Checks arguments against the top level of the parameter schema.
    ///
    /// Verifies the arguments form an object, that every `required` property
    /// is present, and that declared primitive types match. Nested schemas are
    /// left to the executor's own deserialization.
    pub fn validate_args(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        let Some(object) = args.as_object() else {
            return Err(ToolError::invalid_arguments(
                &self.name,
                "arguments must be a JSON object",
            ));
        };

        if let Some(required) = self.parameters.get("required").and_then(|r| r.as_array()) {
            for key in required.iter().filter_map(|k| k.as_str()) {
                if !object.contains_key(key) {
                    return Err(ToolError::invalid_arguments(
                        &self.name,
                        format!("missing required property \"{key}\""),
                    ));
                }
            }
        }

        if let Some(properties) = self.parameters.get("properties").and_then(|p| p.as_object()) {
            for (key, value) in object {
                let expected = properties
                    .get(key)
                    .and_then(|p| p.get("type"))
                    .and_then(|t| t.as_str());
                if let Some(expected) = expected {
                    if !type_matches(expected, value) {
                        return Err(ToolError::invalid_arguments(
                            &self.name,
                            format!("property \"{key}\" must be of type {expected}"),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn type_matches(expected: &str, value: &serde_json::Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}
