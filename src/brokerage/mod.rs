//! Brokerage terminal collaborator

pub mod paper;
pub mod traits;

pub use paper::PaperBrokerage;
#[cfg(test)]
pub use traits::MockBrokerageClient;
pub use traits::BrokerageClient;
