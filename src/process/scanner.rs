//! Process scanning utilities for discovering process entries in /proc.

use crate::error::ProbeError;
use crate::procfs::ProcFs;
use std::fs;
use tracing::warn;

/// True for names made only of ASCII digits, e.g. "1234".
fn is_pid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_digit())
}

impl ProcFs {
    /// Lists live pids in directory order (not sorted).
    ///
    /// Entries that vanish while scanning are skipped; only a root that cannot
    /// be opened is an error.
    pub fn pids(&self) -> Result<Vec<u32>, ProbeError> {
        let entries = fs::read_dir(self.root()).map_err(|e| ProbeError::io(self.root(), e))?;

        let mut out = Vec::new();
        for entry in entries.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(v) => v,
                None => continue,
            };
            if !is_pid_name(name) {
                continue;
            }
            let pid: u32 = match name.parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            out.push(pid);
        }
        Ok(out)
    }

    /// Like [`ProcFs::pids`], but logs a failed scan and returns no pids.
    pub fn pids_or_empty(&self) -> Vec<u32> {
        match self.pids() {
            Ok(pids) => pids,
            Err(e) => {
                warn!("Process enumeration failed: {}", e);
                Vec::new()
            }
        }
    }
}
