//! Tools that talk to the agent's scheduler.

use super::{parse_args, CANCEL_SCHEDULED_TASK, GET_SCHEDULED_TASKS, SCHEDULE_TASK};
use crate::errors::{AgentError, ToolError};
use crate::schedule::{normalize, Normalized, ScheduleRequest, NOT_VALID_SCHEDULE};
use crate::tools::{ToolContext, ToolExecutor};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

#[derive(Deserialize)]
struct ScheduleArgs {
    when: Value,
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelArgs {
    task_id: String,
}

pub(super) fn schedule_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "description": {"type": "string"},
            "when": {
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["scheduled", "delayed", "cron", "no-schedule"],
                        "description": "The type of scheduling details"
                    },
                    "date": {
                        "type": "string",
                        "description": "execute task at the specified date and time (only use if the type is scheduled)"
                    },
                    "delayInSeconds": {
                        "type": "number",
                        "description": "execute task after a delay in seconds (only use if the type is delayed)"
                    },
                    "cron": {
                        "type": "string",
                        "description": "execute task on a recurring interval specified as cron syntax (only use if the type is cron)"
                    }
                },
                "required": ["type"]
            }
        },
        "required": ["description", "when"]
    })
}

/// Schedules a task with the agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleTask;

#[async_trait]
impl ToolExecutor for ScheduleTask {
    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let agent = ctx.require_agent(SCHEDULE_TASK)?;
        let ScheduleArgs { when, description } = parse_args(SCHEDULE_TASK, args)?;

        let request = ScheduleRequest::from_value(&when)?;
        let kind = request.kind();
        let (when, callback) = match normalize(&request)? {
            Normalized::NotValid => return Ok(json!(NOT_VALID_SCHEDULE)),
            Normalized::Ready { when, callback } => (when, callback),
        };

        let input = when.to_string();
        if let Err(e) = agent.schedule(when, callback, &description).await {
            error!(error = %e, "Error scheduling task");
            return Ok(json!(format!("Error scheduling task: {e}")));
        }

        info!(kind, %input, "Task scheduled");
        Ok(json!(format!("Task scheduled for type \"{kind}\" : {input}")))
    }
}

/// Lists the agent's scheduled tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListScheduledTasks;

#[async_trait]
impl ToolExecutor for ListScheduledTasks {
    async fn execute(&self, _args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let agent = ctx.require_agent(GET_SCHEDULED_TASKS)?;

        match agent.get_schedules().await {
            Ok(tasks) if tasks.is_empty() => Ok(json!("No scheduled tasks found.")),
            Ok(tasks) => serde_json::to_value(tasks)
                .map_err(|e| ToolError::execution_failed(GET_SCHEDULED_TASKS, e.to_string())),
            Err(e) => {
                error!(error = %e, "Error listing scheduled tasks");
                Ok(json!(format!("Error listing scheduled tasks: {e}")))
            }
        }
    }
}

/// Cancels one of the agent's scheduled tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelScheduledTask;

#[async_trait]
impl ToolExecutor for CancelScheduledTask {
    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let agent = ctx.require_agent(CANCEL_SCHEDULED_TASK)?;
        let CancelArgs { task_id } = parse_args(CANCEL_SCHEDULED_TASK, args)?;

        let outcome = match agent.cancel_schedule(&task_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AgentError::NotFound {
                id: task_id.clone(),
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                info!(%task_id, "Task canceled");
                Ok(json!(format!("Task {task_id} has been successfully canceled.")))
            }
            Err(e) => {
                error!(%task_id, error = %e, "Error canceling scheduled task");
                Ok(json!(format!("Error canceling task {task_id}: {e}")))
            }
        }
    }
}
