//! Fixed-interval pollers feeding the console's status regions

pub mod account;
pub mod status;

pub use account::AccountPoller;
pub use status::StatusPoller;
