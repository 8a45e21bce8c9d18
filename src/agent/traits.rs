//! TradingAgent trait: the supervised agent as seen by the console
//!
//! The strategy, risk logic and order execution live behind this trait.
//! The console only starts it, stops it and asks whether it is running.

use crate::domain::AgentConfig;
use crate::error::Result;

/// Agent supervised by the console.
///
/// `start` must return quickly: background work belongs on the agent's own
/// worker thread(s). The agent keeps the config it is given at start.
#[cfg_attr(test, mockall::automock)]
pub trait TradingAgent: Send + Sync {
    /// Begin background execution with the given configuration
    fn start(&self, config: &AgentConfig) -> Result<()>;

    /// Request the agent to halt; may return before it has actually halted
    fn stop(&self) -> Result<()>;

    /// Whether the agent's own worker is still running
    fn is_running(&self) -> bool;
}
