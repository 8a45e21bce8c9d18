//! Agent lifecycle controller
//!
//! Owns the agent configuration and the running flag. All transitions go
//! through `&mut self`, so they are serialized on the control thread.

use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::TradingAgent;
use crate::domain::{AgentConfig, AgentStatusLine, Lot, TradeMode};
use crate::error::Result;

/// Outcome of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Agent was started with the requested lot
    Started,
    /// Agent was already running; nothing was changed
    AlreadyRunning,
}

/// Outcome of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Stop was requested from the agent
    Stopped,
    /// Agent was not running; nothing was called
    AlreadyStopped,
}

/// Controls the lifecycle of exactly one agent
pub struct AgentController {
    agent: Arc<dyn TradingAgent>,
    config: AgentConfig,
    running: bool,
    last_error: Option<String>,
}

impl AgentController {
    /// Create a controller around an agent; the agent starts out stopped
    pub fn new(agent: Arc<dyn TradingAgent>, config: AgentConfig) -> Self {
        Self {
            agent,
            config,
            running: false,
            last_error: None,
        }
    }

    /// Start the agent with a new lot.
    ///
    /// The lot is written into the config before the agent is invoked and
    /// rolled back if the agent refuses to start. A
    /// second start while running is ignored with a warning so the agent is
    /// never initialized twice.
    pub fn start(&mut self, lot: Lot) -> Result<StartOutcome> {
        if self.running {
            warn!(
                lot = %lot,
                current_lot = %self.config.position_size,
                "start ignored, agent already running"
            );
            return Ok(StartOutcome::AlreadyRunning);
        }

        let previous_lot = std::mem::replace(&mut self.config.position_size, lot);
        info!(lot = %lot, mode = %self.config.mode, "starting agent");

        match self.agent.start(&self.config) {
            Ok(()) => {
                self.running = true;
                self.last_error = None;
                Ok(StartOutcome::Started)
            }
            Err(e) => {
                warn!(error = %e, "agent failed to start");
                // The agent never ran with the requested lot
                self.config.position_size = previous_lot;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Request the agent to stop. Calling it while stopped is a no-op.
    pub fn stop(&mut self) -> Result<StopOutcome> {
        if !self.running {
            return Ok(StopOutcome::AlreadyStopped);
        }

        info!("stopping agent");
        match self.agent.stop() {
            Ok(()) => {
                self.running = false;
                self.last_error = None;
                Ok(StopOutcome::Stopped)
            }
            Err(e) => {
                warn!(error = %e, "agent failed to stop");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Controller-side running flag; never blocks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the agent's own worker has halted
    pub fn agent_halted(&self) -> bool {
        !self.agent.is_running()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn lot(&self) -> Lot {
        self.config.position_size
    }

    pub fn mode(&self) -> TradeMode {
        self.config.mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshot of the lifecycle state for rendering
    pub fn status(&self) -> AgentStatusLine {
        AgentStatusLine {
            running: self.running,
            lot: self.config.position_size,
            mode: self.config.mode,
            last_error: self.last_error.clone(),
        }
    }
}
