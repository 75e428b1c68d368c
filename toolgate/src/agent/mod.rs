//! The agent collaborator.
//!
//! Auto-executing tools reach the conversation's agent (its task scheduler)
//! through an explicit handle carried by the tool context. Persistence and
//! wake-up of scheduled tasks belong to the agent implementation.

mod memory;

pub use memory::InMemoryAgent;

use crate::errors::AgentError;
use crate::schedule::When;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task registered with the agent's scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    /// Task id.
    pub id: String,
    /// Agent callback invoked when the task fires.
    pub callback: String,
    /// Payload handed to the callback (the task description).
    pub payload: String,
    /// When the task runs.
    pub when: When,
    /// When the task was registered.
    pub created_at: DateTime<Utc>,
    /// Next known run time, if computable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run: Option<DateTime<Utc>>,
}

/// Scheduling surface of the conversation's agent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Agent: Send + Sync {
    /// Registers `callback` to run at `when` with `payload`.
    async fn schedule(
        &self,
        when: When,
        callback: &str,
        payload: &str,
    ) -> Result<ScheduledTask, AgentError>;

    /// Lists registered tasks.
    async fn get_schedules(&self) -> Result<Vec<ScheduledTask>, AgentError>;

    /// Cancels a task. Returns `false` when no such task exists.
    async fn cancel_schedule(&self, task_id: &str) -> Result<bool, AgentError>;
}
