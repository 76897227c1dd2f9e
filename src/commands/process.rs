//! Process command implementation.

use herakles_sysmon::format::{elapsed_time, percent};
use herakles_sysmon::{ProcFs, ProcessMetrics, ProcessSnapshot};

use crate::cli::OutputFormat;

/// Shows metrics for one pid. A vanished pid is reported, not treated as an error.
pub fn command_process(fs: &ProcFs, pid: u32, format: OutputFormat) -> anyhow::Result<()> {
    let exists = fs.pid_file(pid, "stat").exists();
    let metrics = ProcessSnapshot::capture(fs, pid);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
        OutputFormat::Text if !exists => println!("❌ PID {} not found", pid),
        OutputFormat::Text => print_process(&metrics),
    }
    Ok(())
}

fn print_process(m: &ProcessMetrics) {
    println!("🔎 PID {}", m.pid);
    println!("   ├─ Command: {}", m.display_command());
    println!("   ├─ State:   {}", m.state);
    println!("   ├─ User:    {} (uid {})", m.user, m.uid);
    println!("   ├─ RAM:     {} MB", m.ram_mb);
    println!("   ├─ CPU:     {}", percent(m.cpu_utilization));
    println!("   └─ Uptime:  {}", elapsed_time(m.uptime_seconds));
}
