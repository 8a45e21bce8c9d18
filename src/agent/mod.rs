//! Supervised agent: collaborator trait, lifecycle controller and the
//! simulated agent used by the binary.

pub mod controller;
pub mod simulated;
pub mod traits;

pub use controller::{AgentController, StartOutcome, StopOutcome};
pub use simulated::SimulatedAgent;
#[cfg(test)]
pub use traits::MockTradingAgent;
pub use traits::TradingAgent;
