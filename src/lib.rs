pub mod agent;
pub mod bridge;
pub mod brokerage;
pub mod cli;
pub mod config;
pub mod coordination;
pub mod domain;
pub mod error;
pub mod logging;
pub mod poller;
pub mod tui;

pub use agent::{AgentController, SimulatedAgent, StartOutcome, StopOutcome, TradingAgent};
pub use bridge::{log_bridge, LogBridge, LogEvent, LogRouter, LogStream, OriginTag, OutputRedirect};
pub use brokerage::{BrokerageClient, PaperBrokerage};
pub use config::AppConfig;
pub use coordination::{ShutdownCoordinator, ShutdownReport};
pub use domain::{AccountMetrics, AccountSnapshot, AgentConfig, AgentStatusLine, Lot, TradeMode};
pub use error::{LoupError, Result};
pub use poller::{AccountPoller, StatusPoller};
pub use tui::ConsoleRunner;
