use serde::{Deserialize, Serialize};

use crate::domain::Lot;

/// Direction the agent is allowed to trade
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    /// Long entries only
    Long,
    /// Short entries only
    Short,
    /// Both directions, the agent picks per signal
    #[default]
    Duel,
}

impl TradeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeMode::Long => "long",
            TradeMode::Short => "short",
            TradeMode::Duel => "duel",
        }
    }
}

impl std::fmt::Display for TradeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration handed to the agent when it starts.
///
/// The agent receives its own copy at start time, so later operator edits
/// never race with the agent's worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    pub position_size: Lot,
    pub mode: TradeMode,
}

impl AgentConfig {
    pub fn new(position_size: Lot, mode: TradeMode) -> Self {
        Self {
            position_size,
            mode,
        }
    }
}

/// Lifecycle summary rendered by the status poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStatusLine {
    pub running: bool,
    pub lot: Lot,
    pub mode: TradeMode,
    /// Failure of the most recent start/stop, if any
    pub last_error: Option<String>,
}

impl AgentStatusLine {
    pub fn state_label(&self) -> &'static str {
        if self.running {
            "RUNNING"
        } else {
            "STOPPED"
        }
    }
}

impl std::fmt::Display for AgentStatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Agent: {}, lot={} | mode={}",
            self.state_label(),
            self.lot,
            self.mode
        )?;
        if let Some(err) = &self.last_error {
            write!(f, " | last error: {err}")?;
        }
        Ok(())
    }
}
