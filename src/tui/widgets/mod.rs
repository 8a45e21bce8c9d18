//! TUI Widget components
//!
//! One widget per console region.

pub mod account;
pub mod controls;
pub mod footer;
pub mod header;
pub mod help;
pub mod logs;

pub use account::render_account;
pub use controls::render_controls;
pub use footer::render_footer;
pub use header::render_header;
pub use help::render_help;
pub use logs::render_logs;
