//! In-memory agent for tests and single-process hosts.

use super::{Agent, ScheduledTask};
use crate::errors::AgentError;
use crate::schedule::When;
use crate::utils::generate_id;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

/// An agent keeping its schedule in process memory.
///
/// Tasks are never woken; the host is expected to poll
/// [`InMemoryAgent::get_schedules`] if it wants to run them.
#[derive(Debug, Default)]
pub struct InMemoryAgent {
    tasks: RwLock<Vec<ScheduledTask>>,
}

impl InMemoryAgent {
    /// Creates an agent with an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}

#[async_trait]
impl Agent for InMemoryAgent {
    async fn schedule(
        &self,
        when: When,
        callback: &str,
        payload: &str,
    ) -> Result<ScheduledTask, AgentError> {
        let now = Utc::now();
        if let When::At(date) = &when {
            if *date < now {
                return Err(AgentError::Rejected(format!(
                    "cannot schedule a task in the past ({})",
                    date.to_rfc3339()
                )));
            }
        }

        let task = ScheduledTask {
            id: generate_id(),
            callback: callback.to_string(),
            payload: payload.to_string(),
            next_run: when.first_run(now),
            when,
            created_at: now,
        };

        debug!(task_id = %task.id, callback, when = %task.when, "Scheduled task");
        self.tasks.write().push(task.clone());
        Ok(task)
    }

    async fn get_schedules(&self) -> Result<Vec<ScheduledTask>, AgentError> {
        Ok(self.tasks.read().clone())
    }

    async fn cancel_schedule(&self, task_id: &str) -> Result<bool, AgentError> {
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        Ok(tasks.len() < before)
    }
}
