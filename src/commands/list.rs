//! List command implementation.
//!
//! Enumerates processes once and prints a sorted table.

use anyhow::Context;
use herakles_sysmon::format::{elapsed_time, percent};
use herakles_sysmon::{PasswdTable, ProcFs, ProcessMetrics, ProcessSnapshot, UserLookup};
use tracing::{debug, warn};

use crate::cli::{OutputFormat, SortKey};

/// Captures every live process. The passwd file is read once for the whole listing.
pub fn collect_processes(fs: &ProcFs) -> anyhow::Result<Vec<ProcessMetrics>> {
    let pids = fs
        .pids()
        .with_context(|| format!("enumerating processes under {}", fs.root().display()))?;

    let users = fs.passwd_table().unwrap_or_else(|e| {
        warn!("User names unavailable: {}", e);
        PasswdTable::default()
    });

    let processes: Vec<ProcessMetrics> = pids
        .into_iter()
        .map(|pid| ProcessSnapshot::capture_with(fs, pid, UserLookup::Table(&users)))
        // Exited between enumeration and capture
        .filter(|m| !m.comm.is_empty() || !m.command.is_empty())
        .collect();

    debug!("Captured {} processes", processes.len());
    Ok(processes)
}

fn ram_value(m: &ProcessMetrics) -> u64 {
    m.ram_mb.parse().unwrap_or(0)
}

/// Sorts in place: cpu and memory descending, pid ascending.
pub fn sort_processes(processes: &mut [ProcessMetrics], key: SortKey) {
    processes.sort_by(|a, b| match key {
        SortKey::Cpu => b
            .cpu_utilization
            .total_cmp(&a.cpu_utilization)
            .then(a.pid.cmp(&b.pid)),
        SortKey::Memory => ram_value(b).cmp(&ram_value(a)).then(a.pid.cmp(&b.pid)),
        SortKey::Pid => a.pid.cmp(&b.pid),
    });
}

pub fn command_list(
    fs: &ProcFs,
    top: usize,
    sort: SortKey,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut processes = collect_processes(fs)?;
    sort_processes(&mut processes, sort);
    processes.truncate(top);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&processes)?),
        OutputFormat::Text => print_table(&processes),
    }
    Ok(())
}

fn print_table(processes: &[ProcessMetrics]) {
    println!(
        "{:>7}  {:<10} {:>6} {:>8} {:>9}  {}",
        "PID", "USER", "CPU", "RAM[MB]", "TIME+", "COMMAND"
    );
    for p in processes {
        let user: String = p.user.chars().take(10).collect();
        let mut command = p.display_command();
        if command.chars().count() > 60 {
            command = command.chars().take(57).collect::<String>() + "...";
        }
        println!(
            "{:>7}  {:<10} {:>6} {:>8} {:>9}  {}",
            p.pid,
            user,
            percent(p.cpu_utilization),
            p.ram_mb,
            elapsed_time(p.uptime_seconds),
            command
        );
    }
}
