//! Keyed fields from `/proc/<pid>/status`: virtual memory size and owner uid.

use crate::error::ProbeError;
use crate::parser::scan_keys;
use crate::procfs::ProcFs;

const KEY_VM_SIZE: &str = "VmSize:";
const KEY_UID: &str = "Uid:";

/// VmSize and real uid read in a single pass.
///
/// Kernel threads have no VmSize line, so it stays `None` for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStatus {
    pub vm_size_kb: Option<u64>,
    pub uid: Option<String>,
}

impl ProcessStatus {
    /// VmSize as decimal megabytes (kB / 1000), "0" when unknown.
    pub fn ram_mb(&self) -> String {
        (self.vm_size_kb.unwrap_or(0) / 1000).to_string()
    }
}

impl ProcFs {
    pub fn process_status(&self, pid: u32) -> Result<ProcessStatus, ProbeError> {
        let path = self.pid_file(pid, "status");
        let reader = self.open(&path)?;
        let mut values: Vec<Option<String>> = scan_keys(reader, &[KEY_VM_SIZE, KEY_UID], None);

        let uid = values.pop().flatten();
        let vm_size_kb = values.pop().flatten().and_then(|v| v.parse().ok());
        Ok(ProcessStatus { vm_size_kb, uid })
    }

    /// Process memory as a decimal-megabyte string.
    pub fn ram_mb(&self, pid: u32) -> Result<String, ProbeError> {
        let path = self.pid_file(pid, "status");
        let status = self.process_status(pid)?;
        if status.vm_size_kb.is_none() {
            return Err(ProbeError::missing_key(&path, KEY_VM_SIZE));
        }
        Ok(status.ram_mb())
    }

    /// Real uid of the process, as text.
    pub fn uid(&self, pid: u32) -> Result<String, ProbeError> {
        let path = self.pid_file(pid, "status");
        self.process_status(pid)?
            .uid
            .ok_or_else(|| ProbeError::missing_key(&path, KEY_UID))
    }
}
