//! The built-in tool set.
//!
//! Two tools wait for a human decision (`getWeatherInformation`,
//! `getPersuasiveCopy`); the other four run as soon as the model calls them.

mod copy;
mod scheduling;
mod time;
mod weather;

pub use copy::PersuasiveCopy;
pub use scheduling::{CancelScheduledTask, ListScheduledTasks, ScheduleTask};
pub use time::LocalTime;
pub use weather::WeatherInformation;

use super::{ExecutionTable, ToolDefinition, ToolRegistry, Toolset};
use crate::completion::CompletionClient;
use crate::errors::{RegistryError, ToolError};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

/// Weather lookup, confirm-required.
pub const GET_WEATHER_INFORMATION: &str = "getWeatherInformation";
/// Advertising copy generation, confirm-required.
pub const GET_PERSUASIVE_COPY: &str = "getPersuasiveCopy";
/// Local time lookup.
pub const GET_LOCAL_TIME: &str = "getLocalTime";
/// Task scheduling.
pub const SCHEDULE_TASK: &str = "scheduleTask";
/// Scheduled task listing.
pub const GET_SCHEDULED_TASKS: &str = "getScheduledTasks";
/// Scheduled task cancellation.
pub const CANCEL_SCHEDULED_TASK: &str = "cancelScheduledTask";

/// Builds the built-in registry and its execution table.
pub fn default_toolset(completion: Arc<dyn CompletionClient>) -> Result<Toolset, RegistryError> {
    let executions = ExecutionTable::new()
        .with(GET_WEATHER_INFORMATION, Arc::new(WeatherInformation))
        .with(GET_PERSUASIVE_COPY, Arc::new(PersuasiveCopy::new(completion)));

    let builder = ToolRegistry::builder()
        .tool(
            ToolDefinition::confirm(GET_WEATHER_INFORMATION)
                .with_description("show the weather in a given city to the user")
                .with_parameters(string_params("city", None)),
        )
        .tool(
            ToolDefinition::confirm(GET_PERSUASIVE_COPY)
                .with_description(
                    "generate persuasive copy texts used in advertisements and marketing campaigns",
                )
                .with_parameters(string_params("prompt", None)),
        )
        .tool(
            ToolDefinition::auto(GET_LOCAL_TIME, Arc::new(LocalTime))
                .with_description("get the local time for a specified location")
                .with_parameters(string_params("location", None)),
        )
        .tool(
            ToolDefinition::auto(SCHEDULE_TASK, Arc::new(ScheduleTask))
                .with_description("A tool to schedule a task to be executed at a later time")
                .with_parameters(scheduling::schedule_schema()),
        )
        .tool(
            ToolDefinition::auto(GET_SCHEDULED_TASKS, Arc::new(ListScheduledTasks))
                .with_description("List all tasks that have been scheduled"),
        )
        .tool(
            ToolDefinition::auto(CANCEL_SCHEDULED_TASK, Arc::new(CancelScheduledTask))
                .with_description("Cancel a scheduled task using its ID")
                .with_parameters(string_params(
                    "taskId",
                    Some("The ID of the task to cancel"),
                )),
        );

    Toolset::new(builder, executions)
}

fn string_params(name: &str, description: Option<&str>) -> serde_json::Value {
    let mut property = json!({"type": "string"});
    if let Some(description) = description {
        property["description"] = json!(description);
    }
    json!({
        "type": "object",
        "properties": {name: property},
        "required": [name]
    })
}

pub(crate) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    args: serde_json::Value,
) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}
