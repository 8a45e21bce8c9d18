//! Coordination of the console's own lifecycle

pub mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownReport};
