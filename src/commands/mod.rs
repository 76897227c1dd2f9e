//! CLI command implementations for herakles-sysmon.
//!
//! This module provides implementations for all CLI subcommands:
//! - `system`: System-wide summary
//! - `process`: Metrics for one pid
//! - `list`: Process table
//! - `snapshot`: JSON dump of system and processes
//! - `check`: Runtime requirement validation

pub mod check;
pub mod list;
pub mod process;
pub mod snapshot;
pub mod system;

// Re-export command functions
pub use check::command_check;
pub use list::command_list;
pub use process::command_process;
pub use snapshot::command_snapshot;
pub use system::command_system;
