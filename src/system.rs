//! System-wide metrics collection from /proc filesystem.
//!
//! This module reads the aggregate CPU jiffy counters, memory totals, boot
//! uptime and process counts, plus the OS and kernel identification strings.

use crate::error::ProbeError;
use crate::parser::{first_token, lossy_lines, scan_key, scan_keys};
use crate::procfs::ProcFs;
use crate::utilization::system_cpu_utilization;
use serde::Serialize;
use tracing::debug;

/// Number of counters on a full `cpu` line of /proc/stat.
pub const CPU_STATE_COUNT: usize = 10;

/// Aggregate CPU time counters in clock ticks since boot.
///
/// Older kernels report fewer than ten counters; the missing trailing slots
/// are zero and `present` records how many were actually read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuStates {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
    pub present: usize,
}

impl CpuStates {
    /// Builds from counters in kernel order; extra values past the tenth are ignored.
    pub fn from_counters(counters: &[u64]) -> Self {
        let at = |i: usize| counters.get(i).copied().unwrap_or(0);
        Self {
            user: at(0),
            nice: at(1),
            system: at(2),
            idle: at(3),
            iowait: at(4),
            irq: at(5),
            softirq: at(6),
            steal: at(7),
            guest: at(8),
            guest_nice: at(9),
            present: counters.len().min(CPU_STATE_COUNT),
        }
    }

    /// Parses the aggregate `cpu  ...` line.
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some(label) if label.starts_with("cpu") => {}
            Some(label) => return Err(format!("expected cpu label, got '{}'", label)),
            None => return Err("empty cpu line".to_string()),
        }

        let counters = parts
            .take(CPU_STATE_COUNT)
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|e| format!("invalid cpu counter '{}': {}", v, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if counters.is_empty() {
            return Err("cpu line has no counters".to_string());
        }

        Ok(Self::from_counters(&counters))
    }

    /// Total CPU time: user through steal, saturating at `u64::MAX`.
    /// guest and guest_nice are already accounted in user and nice.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }

    /// Calculate non-active time (idle + iowait).
    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn active(&self) -> u64 {
        self.total().saturating_sub(self.idle_total())
    }
}

/// Memory totals from /proc/meminfo, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemorySnapshot {
    /// (total - free) / total, or 0.0 when total is unknown.
    pub fn utilization(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        self.total_kb.saturating_sub(self.free_kb) as f64 / self.total_kb as f64
    }
}

/// System overview built from one read of each system file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemSummary {
    pub operating_system: String,
    pub kernel: String,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub uptime_seconds: u64,
    pub total_processes: u32,
    pub running_processes: u32,
}

impl SystemSummary {
    /// Reads everything once; unavailable values fall back to their defaults.
    pub fn capture(fs: &ProcFs) -> Self {
        Self {
            operating_system: or_default("operating system", fs.operating_system()),
            kernel: or_default("kernel", fs.kernel()),
            cpu_utilization: fs.cpu_utilization(),
            memory_utilization: fs.memory_utilization(),
            uptime_seconds: or_default("uptime", fs.uptime_seconds()),
            total_processes: or_default("total processes", fs.total_processes()),
            running_processes: or_default("running processes", fs.running_processes()),
        }
    }
}

/// Logs a degraded read and substitutes the type's default.
pub(crate) fn or_default<T: Default>(what: &str, result: Result<T, ProbeError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            debug!("{} unavailable: {}", what, e);
            T::default()
        }
    }
}

impl ProcFs {
    /// Reads the aggregate CPU counters from the first line of /proc/stat.
    pub fn cpu_states(&self) -> Result<CpuStates, ProbeError> {
        let path = self.system_file("stat");
        let reader = self.open(&path)?;
        let line = lossy_lines(reader)
            .next()
            .transpose()
            .map_err(|e| ProbeError::io(&path, e))?
            .ok_or_else(|| ProbeError::malformed(&path, "empty file"))?;

        CpuStates::parse_line(&line).map_err(|reason| ProbeError::malformed(&path, reason))
    }

    /// Sum of user..steal jiffies, 0 if unavailable.
    pub fn total_jiffies(&self) -> u64 {
        or_default("cpu states", self.cpu_states()).total()
    }

    /// Sum of idle and iowait jiffies, 0 if unavailable.
    pub fn idle_jiffies(&self) -> u64 {
        or_default("cpu states", self.cpu_states()).idle_total()
    }

    /// Total minus idle jiffies, 0 if unavailable.
    pub fn active_jiffies(&self) -> u64 {
        or_default("cpu states", self.cpu_states()).active()
    }

    /// Share of non-idle jiffies since boot, in [0, 1].
    pub fn cpu_utilization(&self) -> f64 {
        system_cpu_utilization(&or_default("cpu states", self.cpu_states()))
    }

    /// Reads MemTotal and MemFree.
    pub fn memory(&self) -> Result<MemorySnapshot, ProbeError> {
        let path = self.system_file("meminfo");
        let reader = self.open(&path)?;
        let values: Vec<Option<u64>> = scan_keys(reader, &["MemTotal", "MemFree"], Some(':'));

        match (values[0], values[1]) {
            (Some(total_kb), Some(free_kb)) => Ok(MemorySnapshot { total_kb, free_kb }),
            (None, _) => Err(ProbeError::missing_key(&path, "MemTotal")),
            (_, None) => Err(ProbeError::missing_key(&path, "MemFree")),
        }
    }

    /// Used share of physical memory, 0.0 if unavailable.
    pub fn memory_utilization(&self) -> f64 {
        or_default("memory", self.memory()).utilization()
    }

    /// Seconds since boot, fractional part truncated.
    pub fn uptime_seconds(&self) -> Result<u64, ProbeError> {
        let path = self.system_file("uptime");
        let reader = self.open(&path)?;
        let uptime: f64 = first_token(reader)
            .ok_or_else(|| ProbeError::malformed(&path, "no uptime field"))?;
        if !uptime.is_finite() || uptime < 0.0 {
            return Err(ProbeError::malformed(&path, format!("invalid uptime {}", uptime)));
        }
        Ok(uptime.trunc() as u64)
    }

    /// Processes forked since boot (`processes` in /proc/stat).
    pub fn total_processes(&self) -> Result<u32, ProbeError> {
        self.stat_counter("processes")
    }

    /// Processes currently runnable (`procs_running` in /proc/stat).
    pub fn running_processes(&self) -> Result<u32, ProbeError> {
        self.stat_counter("procs_running")
    }

    fn stat_counter(&self, key: &str) -> Result<u32, ProbeError> {
        let path = self.system_file("stat");
        let reader = self.open(&path)?;
        scan_key(reader, key, None).ok_or_else(|| ProbeError::missing_key(&path, key))
    }

    /// PRETTY_NAME from os-release, quotes stripped.
    pub fn operating_system(&self) -> Result<String, ProbeError> {
        let path = self.os_release_path();
        let content = self.read_to_string(path)?;

        content
            .lines()
            .filter_map(|line| line.split_once('='))
            .find(|(key, _)| key.trim() == "PRETTY_NAME")
            .map(|(_, value)| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .ok_or_else(|| ProbeError::missing_key(path, "PRETTY_NAME"))
    }

    /// Kernel release, the third token of /proc/version.
    pub fn kernel(&self) -> Result<String, ProbeError> {
        let path = self.system_file("version");
        let content = self.read_to_string(&path)?;
        content
            .split_whitespace()
            .nth(2)
            .map(str::to_string)
            .ok_or_else(|| ProbeError::malformed(&path, "expected at least 3 fields"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_line_full() {
        let s = CpuStates::parse_line("cpu  10 20 30 400 50 6 7 8 9 11").unwrap();
        assert_eq!(s.user, 10);
        assert_eq!(s.steal, 8);
        assert_eq!(s.guest, 9);
        assert_eq!(s.guest_nice, 11);
        assert_eq!(s.present, 10);
        assert_eq!(s.total(), 10 + 20 + 30 + 400 + 50 + 6 + 7 + 8);
        assert_eq!(s.idle_total(), 450);
        assert_eq!(s.active(), 81);
    }

    #[test]
    fn test_totals_saturate_on_huge_counters() {
        let line = format!("cpu  {} 1 1 {} 1 0 0 0 0 0", u64::MAX, u64::MAX);
        let s = CpuStates::parse_line(&line).unwrap();
        assert_eq!(s.total(), u64::MAX);
        assert_eq!(s.idle_total(), u64::MAX);
        assert_eq!(s.active(), 0);
        assert!((0.0..=1.0).contains(&system_cpu_utilization(&s)));
    }

    #[test]
    fn test_parse_cpu_line_short() {
        // 2.6.11-era kernels stop after softirq
        let s = CpuStates::parse_line("cpu 1 2 3 4 5 6 7").unwrap();
        assert_eq!(s.present, 7);
        assert_eq!(s.steal, 0);
        assert_eq!(s.guest_nice, 0);
        assert_eq!(s.total(), 28);
    }

    #[test]
    fn test_parse_cpu_line_invalid() {
        assert!(CpuStates::parse_line("intr 1 2 3").is_err());
        assert!(CpuStates::parse_line("cpu 1 two 3").is_err());
        assert!(CpuStates::parse_line("cpu").is_err());
        assert!(CpuStates::parse_line("").is_err());
    }

    #[test]
    fn test_total_ignores_guest_slots() {
        let a = CpuStates::from_counters(&[1, 2, 3, 4, 5, 6, 7, 8, 0, 0]);
        let b = CpuStates::from_counters(&[1, 2, 3, 4, 5, 6, 7, 8, 1000, 2000]);
        assert_eq!(a.total(), b.total());
        assert_eq!(a.total(), 36);
    }

    #[test]
    fn test_memory_utilization() {
        let m = MemorySnapshot {
            total_kb: 16_000_000,
            free_kb: 4_000_000,
        };
        assert_eq!(m.utilization(), 0.75);
    }

    #[test]
    fn test_memory_utilization_zero_total() {
        assert_eq!(MemorySnapshot::default().utilization(), 0.0);
    }
}
