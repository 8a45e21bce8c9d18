//! Log bridge: one ordered stream of output lines into the console
//!
//! - [`LogBridge`] / [`LogStream`]: many producers, one consumer, arrival order kept
//! - [`LogRouter`] / [`OutputRedirect`]: scoped redirection of the global log output

pub mod channel;
pub mod router;

pub use channel::{log_bridge, LogBridge, LogEvent, LogStream, OriginTag};
pub use router::{LogRouter, OutputRedirect, RoutedWriter};
