//! System command implementation.
//!
//! Prints OS, kernel, CPU and memory utilization, uptime and process counts.

use std::thread;
use std::time::Duration;

use anyhow::Context;
use herakles_sysmon::format::{elapsed_time, percent};
use herakles_sysmon::utilization::cpu_utilization_between;
use herakles_sysmon::{ProcFs, SystemSummary};
use tracing::debug;

use crate::cli::OutputFormat;

/// Shows the system summary. With `interval_ms`, CPU utilization is measured
/// between two samples taken that far apart instead of since boot.
pub fn command_system(
    fs: &ProcFs,
    interval_ms: Option<u64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut summary = SystemSummary::capture(fs);

    if let Some(ms) = interval_ms {
        let first = fs.cpu_states().context("reading CPU counters")?;
        thread::sleep(Duration::from_millis(ms));
        let second = fs.cpu_states().context("reading CPU counters")?;
        summary.cpu_utilization = cpu_utilization_between(&first, &second);
        debug!(
            "CPU utilization over {}ms: {:.4}",
            ms, summary.cpu_utilization
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }
    Ok(())
}

fn print_summary(s: &SystemSummary) {
    println!("🖥️  OS:        {}", s.operating_system);
    println!("   Kernel:    {}", s.kernel);
    println!("   CPU:       {}", percent(s.cpu_utilization));
    println!("   Memory:    {}", percent(s.memory_utilization));
    println!("   Uptime:    {}", elapsed_time(s.uptime_seconds));
    println!("   Processes: {}", s.total_processes);
    println!("   Running:   {}", s.running_processes);
}
