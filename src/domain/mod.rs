pub mod account;
pub mod agent;
pub mod lot;

pub use account::*;
pub use agent::*;
pub use lot::*;
