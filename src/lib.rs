//! Herakles System Monitor Library
//!
//! Data-acquisition core for terminal resource monitors. It reads the Linux
//! `/proc` pseudo-filesystem and derives CPU and memory utilization from the
//! kernel's cumulative counters.
//!
//! # Features
//!
//! - **System counters**: aggregate CPU jiffies, memory totals, uptime, process counts
//! - **Per-process metrics**: CPU share, memory, owner, uptime and command line
//! - **Stateless queries**: every call is a fresh read, no caches between calls
//! - **Graceful degradation**: vanished pids and short files yield default values
//!
//! # Usage
//!
//! ```rust,no_run
//! use herakles_sysmon::{format, ProcFs, ProcessSnapshot};
//!
//! let fs = ProcFs::default();
//!
//! println!("CPU: {:.1}%", fs.cpu_utilization() * 100.0);
//! println!("Memory: {:.1}%", fs.memory_utilization() * 100.0);
//!
//! for pid in fs.pids_or_empty() {
//!     let p = ProcessSnapshot::capture(&fs, pid);
//!     println!("{} {} {}", p.pid, p.user, format::elapsed_time(p.uptime_seconds));
//! }
//! ```

pub mod error;
pub mod format;
pub mod parser;
pub mod process;
pub mod procfs;
pub mod system;
pub mod utilization;

// Re-export main types for convenience
pub use error::ProbeError;
pub use process::{PasswdTable, ProcessMetrics, ProcessSnapshot, ProcessStatFields, UserLookup};
pub use procfs::{ProcFs, CLK_TCK};
pub use system::{CpuStates, MemorySnapshot, SystemSummary};
