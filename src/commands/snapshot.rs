//! Snapshot command implementation.
//!
//! Emits the system summary and every process as one JSON document.

use chrono::{DateTime, Utc};
use herakles_sysmon::{ProcFs, ProcessMetrics, SystemSummary};
use serde::Serialize;

use super::list::{collect_processes, sort_processes};
use crate::cli::SortKey;

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub sampled_at: DateTime<Utc>,
    pub clock_ticks: u64,
    pub system: SystemSummary,
    pub processes: Vec<ProcessMetrics>,
}

pub fn capture_snapshot(fs: &ProcFs) -> anyhow::Result<Snapshot> {
    let sampled_at = Utc::now();
    let system = SystemSummary::capture(fs);
    let mut processes = collect_processes(fs)?;
    sort_processes(&mut processes, SortKey::Pid);

    Ok(Snapshot {
        sampled_at,
        clock_ticks: fs.clock_ticks(),
        system,
        processes,
    })
}

pub fn command_snapshot(fs: &ProcFs) -> anyhow::Result<()> {
    let snapshot = capture_snapshot(fs)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
