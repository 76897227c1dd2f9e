//! Per-process metrics assembled from one read of each /proc/<pid> file.

use crate::error::ProbeError;
use crate::parser::lossy_lines;
use crate::procfs::ProcFs;
use crate::process::stat::ProcessStatFields;
use crate::process::status::ProcessStatus;
use crate::process::user::PasswdTable;
use crate::system::or_default;
use crate::utilization::process_cpu_utilization;
use serde::Serialize;
use tracing::debug;

/// Everything a process table row needs. Built fresh on every capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: u32,
    /// Raw first line of cmdline, NUL separators included.
    pub command: String,
    /// Name from the stat line; kernel threads have no cmdline but do have this.
    pub comm: String,
    pub state: char,
    pub ram_mb: String,
    pub uid: String,
    pub user: String,
    pub cpu_utilization: f64,
    pub uptime_seconds: u64,
}

impl ProcessMetrics {
    /// Command line for display: NULs shown as spaces, `[comm]` when empty.
    pub fn display_command(&self) -> String {
        let cmd = self.command.replace('\0', " ");
        let cmd = cmd.trim();
        if cmd.is_empty() {
            if self.comm.is_empty() {
                return String::new();
            }
            return format!("[{}]", self.comm);
        }
        cmd.to_string()
    }
}

/// Where uid to name resolution comes from during a capture.
pub enum UserLookup<'a> {
    /// Scan the passwd file for this pid only.
    Scan,
    /// Use a table loaded once for the whole listing.
    Table(&'a PasswdTable),
}

pub struct ProcessSnapshot;

impl ProcessSnapshot {
    /// Captures one process, scanning the passwd file for its owner.
    ///
    /// A pid that does not exist yields default metrics with only `pid` set.
    pub fn capture(fs: &ProcFs, pid: u32) -> ProcessMetrics {
        Self::capture_with(fs, pid, UserLookup::Scan)
    }

    pub fn capture_with(fs: &ProcFs, pid: u32, users: UserLookup<'_>) -> ProcessMetrics {
        let stat = fs.stat_fields(pid);
        let status = or_default("process status", fs.process_status(pid));
        let command = or_default("command", fs.command(pid));
        let system_uptime = or_default("uptime", fs.uptime_seconds());

        let (comm, state, cpu_utilization, uptime_seconds) = match &stat {
            Ok(fields) => {
                let uptime = process_uptime(system_uptime, fields, fs.clock_ticks());
                (
                    fields.comm.clone(),
                    fields.state,
                    process_cpu_utilization(fields.active_ticks(), uptime, fs.clock_ticks()),
                    uptime.max(0) as u64,
                )
            }
            Err(e) => {
                debug!("stat for pid {} unavailable: {}", pid, e);
                (String::new(), char::default(), 0.0, 0)
            }
        };

        let uid = status.uid.clone().unwrap_or_default();
        let user = if uid.is_empty() {
            String::new()
        } else {
            match users {
                UserLookup::Table(table) => table.name(&uid).unwrap_or_default().to_string(),
                UserLookup::Scan => or_default("user", fs.user_name_for_uid(&uid)).unwrap_or_default(),
            }
        };

        ProcessMetrics {
            pid,
            command,
            comm,
            state,
            ram_mb: ram_mb_or_empty(&status),
            uid,
            user,
            cpu_utilization,
            uptime_seconds,
        }
    }
}

fn ram_mb_or_empty(status: &ProcessStatus) -> String {
    if status.vm_size_kb.is_some() {
        status.ram_mb()
    } else {
        String::new()
    }
}

/// System uptime minus process start, in seconds. Negative when the start
/// time is ahead of the uptime reading.
fn process_uptime(system_uptime: u64, fields: &ProcessStatFields, clk_tck: u64) -> i64 {
    let uptime = i64::try_from(system_uptime).unwrap_or(i64::MAX);
    let start = i64::try_from(fields.start_seconds(clk_tck)).unwrap_or(i64::MAX);
    uptime.saturating_sub(start)
}

impl ProcFs {
    /// First line of /proc/<pid>/cmdline, verbatim apart from invalid UTF-8
    /// becoming U+FFFD. Empty for kernel threads.
    pub fn command(&self, pid: u32) -> Result<String, ProbeError> {
        let path = self.pid_file(pid, "cmdline");
        let reader = self.open(&path)?;
        match lossy_lines(reader).next() {
            Some(line) => line.map_err(|e| ProbeError::io(&path, e)),
            None => Ok(String::new()),
        }
    }

    /// utime + stime + cutime + cstime of `pid`, in clock ticks.
    pub fn process_active_jiffies(&self, pid: u32) -> Result<u64, ProbeError> {
        Ok(self.stat_fields(pid)?.active_ticks())
    }

    /// Seconds since the process started, clamped at zero.
    pub fn process_uptime_seconds(&self, pid: u32) -> Result<u64, ProbeError> {
        let fields = self.stat_fields(pid)?;
        let uptime = self.uptime_seconds()?;
        Ok(process_uptime(uptime, &fields, self.clock_ticks()).max(0) as u64)
    }

    /// Lifetime CPU share of `pid`; 0.0 if any input is unavailable.
    pub fn process_cpu_utilization(&self, pid: u32) -> f64 {
        let result = self.stat_fields(pid).and_then(|fields| {
            let uptime = self.uptime_seconds()?;
            let uptime = process_uptime(uptime, &fields, self.clock_ticks());
            Ok(process_cpu_utilization(
                fields.active_ticks(),
                uptime,
                self.clock_ticks(),
            ))
        });
        or_default("process cpu utilization", result)
    }
}
