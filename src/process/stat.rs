//! Positional parsing of `/proc/<pid>/stat`.
//!
//! The second field is the command name in parentheses and may itself contain
//! spaces and parentheses, e.g. `1234 (tmux: server (1)) S 1 ...`. The name
//! ends at the last `)` on the line; the fields after it are numbered from 3.

use crate::error::ProbeError;
use crate::procfs::ProcFs;
use std::str::FromStr;

// 1-indexed positions as documented in proc(5).
const FIELD_UTIME: usize = 14;
const FIELD_STIME: usize = 15;
const FIELD_CUTIME: usize = 16;
const FIELD_CSTIME: usize = 17;
const FIELD_STARTTIME: usize = 22;

/// The subset of /proc/<pid>/stat this crate uses. Times are in clock ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStatFields {
    pub pid: u32,
    pub comm: String,
    pub state: char,
    pub utime: u64,
    pub stime: u64,
    /// Waited-for children; signed in the kernel ABI.
    pub cutime: i64,
    pub cstime: i64,
    /// Start time after boot. A timestamp, never part of the active sum.
    pub starttime: u64,
}

/// Field `n` (1-indexed) given the fields following the command name.
fn field<'a>(rest: &[&'a str], n: usize) -> Result<&'a str, String> {
    rest.get(n - 3)
        .copied()
        .ok_or_else(|| format!("expected at least {} fields, got {}", n, rest.len() + 2))
}

fn numeric<T: FromStr>(rest: &[&str], n: usize, name: &str) -> Result<T, String> {
    let value = field(rest, n)?;
    value
        .parse::<T>()
        .map_err(|_| format!("invalid {} field '{}'", name, value))
}

impl ProcessStatFields {
    pub fn parse(line: &str) -> Result<Self, String> {
        let open = line.find('(').ok_or("missing '(' before command name")?;
        let close = line.rfind(')').ok_or("missing ')' after command name")?;
        if close < open {
            return Err("unbalanced command name parentheses".to_string());
        }

        let pid: u32 = line[..open]
            .trim()
            .parse()
            .map_err(|e| format!("invalid pid field: {}", e))?;
        let comm = line[open + 1..close].to_string();

        // rest[0] is field 3 (state)
        let rest: Vec<&str> = line[close + 1..].split_whitespace().collect();
        let state = field(&rest, 3)?.chars().next().unwrap_or('?');

        Ok(Self {
            pid,
            comm,
            state,
            utime: numeric(&rest, FIELD_UTIME, "utime")?,
            stime: numeric(&rest, FIELD_STIME, "stime")?,
            cutime: numeric(&rest, FIELD_CUTIME, "cutime")?,
            cstime: numeric(&rest, FIELD_CSTIME, "cstime")?,
            starttime: numeric(&rest, FIELD_STARTTIME, "starttime")?,
        })
    }

    /// utime + stime + cutime + cstime, negatives treated as zero.
    /// Saturates instead of wrapping on corrupt counters.
    pub fn active_ticks(&self) -> u64 {
        self.utime
            .saturating_add(self.stime)
            .saturating_add(self.cutime.max(0) as u64)
            .saturating_add(self.cstime.max(0) as u64)
    }

    /// Start time in whole seconds after boot.
    pub fn start_seconds(&self, clk_tck: u64) -> u64 {
        if clk_tck == 0 {
            return 0;
        }
        self.starttime / clk_tck
    }
}

impl ProcFs {
    /// Reads and parses /proc/<pid>/stat.
    pub fn stat_fields(&self, pid: u32) -> Result<ProcessStatFields, ProbeError> {
        let path = self.pid_file(pid, "stat");
        let content = self.read_to_string(&path)?;
        let line = content.lines().next().unwrap_or("");
        ProcessStatFields::parse(line).map_err(|reason| ProbeError::malformed(&path, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Typical /proc/<pid>/stat format:
    // pid (comm) state ppid pgrp session tty_nr tpgid flags minflt cminflt majflt cmajflt utime stime cutime cstime ...
    const STAT: &str = "1234 (test_process) S 1 1234 1234 0 -1 4194304 100 0 0 0 1000 500 30 20 20 0 1 0 12345 12345678 1234 18446744073709551615 4194304 4238788 140736466511168 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";

    #[test]
    fn test_parse_named_fields() {
        let f = ProcessStatFields::parse(STAT).unwrap();
        assert_eq!(f.pid, 1234);
        assert_eq!(f.comm, "test_process");
        assert_eq!(f.state, 'S');
        assert_eq!(f.utime, 1000);
        assert_eq!(f.stime, 500);
        assert_eq!(f.cutime, 30);
        assert_eq!(f.cstime, 20);
        assert_eq!(f.starttime, 12345);
    }

    #[test]
    fn test_active_ticks_excludes_starttime() {
        let f = ProcessStatFields::parse(STAT).unwrap();
        assert_eq!(f.active_ticks(), 1000 + 500 + 30 + 20);
    }

    #[test]
    fn test_parse_command_with_spaces_and_parens() {
        let line = STAT.replace("(test_process)", "(tmux: server (1) x)");
        let f = ProcessStatFields::parse(&line).unwrap();
        assert_eq!(f.comm, "tmux: server (1) x");
        assert_eq!(f.state, 'S');
        assert_eq!(f.utime, 1000);
        assert_eq!(f.starttime, 12345);
    }

    #[test]
    fn test_parse_command_with_trailing_paren_text() {
        let line = STAT.replace("(test_process)", "() S 9 9 ()");
        let f = ProcessStatFields::parse(&line).unwrap();
        assert_eq!(f.comm, ") S 9 9 (");
        assert_eq!(f.utime, 1000);
    }

    #[test]
    fn test_negative_child_times_clamp() {
        let line = STAT.replace(" 1000 500 30 20 ", " 1000 500 -5 -1 ");
        let f = ProcessStatFields::parse(&line).unwrap();
        assert_eq!(f.cutime, -5);
        assert_eq!(f.active_ticks(), 1500);
    }

    #[test]
    fn test_active_ticks_saturates_on_huge_counters() {
        let line = STAT.replace(" 1000 500 30 20 ", " 18446744073709551615 1 0 0 ");
        let f = ProcessStatFields::parse(&line).unwrap();
        assert_eq!(f.utime, u64::MAX);
        assert_eq!(f.active_ticks(), u64::MAX);

        let line = STAT.replace(" 1000 500 30 20 ", " 1 1 9223372036854775807 9223372036854775807 ");
        let f = ProcessStatFields::parse(&line).unwrap();
        assert_eq!(f.active_ticks(), u64::MAX);
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(ProcessStatFields::parse("1234 (test) S 1 2 3").is_err());
    }

    #[test]
    fn test_parse_missing_parens() {
        assert!(ProcessStatFields::parse("1234 test S 1 2 3").is_err());
        assert!(ProcessStatFields::parse("").is_err());
    }

    #[test]
    fn test_parse_non_numeric_field() {
        let line = STAT.replace(" 1000 500 ", " lots 500 ");
        assert!(ProcessStatFields::parse(&line).is_err());
    }

    #[test]
    fn test_start_seconds() {
        let f = ProcessStatFields::parse(STAT).unwrap();
        assert_eq!(f.start_seconds(100), 123);
        assert_eq!(f.start_seconds(0), 0);
    }
}
