//! Location of the pseudo-filesystems the probe reads from.
//!
//! `ProcFs` only holds paths and the clock tick rate. It carries no cached
//! kernel state, so every query on it is a fresh read.

use crate::error::ProbeError;
use once_cell::sync::Lazy;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";
pub const DEFAULT_PASSWD: &str = "/etc/passwd";

/// Get system clock ticks per second (usually 100, but can vary).
fn get_clk_tck() -> u64 {
    #[cfg(unix)]
    {
        // SAFETY: sysconf is safe to call with _SC_CLK_TCK
        // Returns -1 on error, 0 if undefined - both are handled by the > 0 check
        unsafe {
            let tck = libc::sysconf(libc::_SC_CLK_TCK);
            if tck > 0 {
                return tck as u64;
            }
        }
    }
    100
}

/// System clock ticks per second (for jiffy to seconds conversion).
pub static CLK_TCK: Lazy<u64> = Lazy::new(get_clk_tck);

/// Paths and tick rate used by every query.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
    os_release: PathBuf,
    passwd: PathBuf,
    clk_tck: u64,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_PROC_ROOT),
            os_release: PathBuf::from(DEFAULT_OS_RELEASE),
            passwd: PathBuf::from(DEFAULT_PASSWD),
            clk_tck: *CLK_TCK,
        }
    }
}

impl ProcFs {
    /// Probe rooted at `root` instead of /proc; os-release and passwd stay at their defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn with_passwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.passwd = path.into();
        self
    }

    /// Override the tick rate. Zero is ignored.
    pub fn with_clock_ticks(mut self, clk_tck: u64) -> Self {
        if clk_tck > 0 {
            self.clk_tck = clk_tck;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn os_release_path(&self) -> &Path {
        &self.os_release
    }

    pub fn passwd_path(&self) -> &Path {
        &self.passwd
    }

    pub fn clock_ticks(&self) -> u64 {
        self.clk_tck
    }

    /// `<root>/<name>`
    pub fn system_file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// `<root>/<pid>/<name>`
    pub fn pid_file(&self, pid: u32, name: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(name)
    }

    pub(crate) fn open(&self, path: &Path) -> Result<BufReader<fs::File>, ProbeError> {
        fs::File::open(path)
            .map(BufReader::new)
            .map_err(|e| ProbeError::io(path, e))
    }

    /// Whole file as text; invalid UTF-8 is replaced rather than rejected.
    pub(crate) fn read_to_string(&self, path: &Path) -> Result<String, ProbeError> {
        fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| ProbeError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let fs = ProcFs::default();
        assert_eq!(fs.root(), Path::new("/proc"));
        assert_eq!(fs.os_release_path(), Path::new("/etc/os-release"));
        assert_eq!(fs.passwd_path(), Path::new("/etc/passwd"));
        assert!(fs.clock_ticks() > 0);
    }

    #[test]
    fn test_pid_file_layout() {
        let fs = ProcFs::new("/tmp/fakeproc");
        assert_eq!(
            fs.pid_file(42, "status"),
            PathBuf::from("/tmp/fakeproc/42/status")
        );
        assert_eq!(fs.system_file("meminfo"), PathBuf::from("/tmp/fakeproc/meminfo"));
    }

    #[test]
    fn test_zero_clock_ticks_ignored() {
        let fs = ProcFs::new("/proc").with_clock_ticks(250).with_clock_ticks(0);
        assert_eq!(fs.clock_ticks(), 250);
    }
}
