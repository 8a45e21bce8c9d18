use std::time::Duration;

use crate::agent::AgentController;
use crate::domain::AgentStatusLine;

/// Re-renders the lifecycle summary on a fixed interval
#[derive(Debug, Clone, Copy)]
pub struct StatusPoller {
    interval: Duration,
}

impl StatusPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current running/stopped summary. Reads controller state only.
    pub fn render(&self, controller: &AgentController) -> AgentStatusLine {
        controller.status()
    }
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}
