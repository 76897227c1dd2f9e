//! Process-related modules for per-pid counters and metrics.
//!
//! This module provides:
//! - `scanner`: Process discovery in the /proc root
//! - `stat`: Positional parsing of /proc/<pid>/stat
//! - `status`: VmSize and Uid from /proc/<pid>/status
//! - `user`: Uid to user name resolution via the passwd file
//! - `snapshot`: One-shot capture of all metrics for a pid

pub mod scanner;
pub mod snapshot;
pub mod stat;
pub mod status;
pub mod user;

// Re-export commonly used types
pub use snapshot::{ProcessMetrics, ProcessSnapshot, UserLookup};
pub use stat::ProcessStatFields;
pub use status::ProcessStatus;
pub use user::PasswdTable;
