//! Runtime requirement validation for herakles-sysmon.
//!
//! This module validates that the proc filesystem is present and readable
//! before reports are produced.

use herakles_sysmon::ProcFs;
use nix::unistd::geteuid;
use tracing::{debug, error, info, warn};

/// Validate all runtime requirements
pub fn validate_requirements(fs: &ProcFs) -> Result<(), ValidationError> {
    info!("🔍 Validating runtime requirements...");

    check_user_privileges();
    check_system_files(fs)?;
    check_process_listing(fs)?;

    info!("✅ All runtime requirements validated");
    Ok(())
}

/// Other users' processes stay listable without root, only some fields may be hidden.
fn check_user_privileges() {
    if !geteuid().is_root() {
        warn!("⚠️  Not running as root - some per-process fields may be unreadable");
    } else {
        info!("✅ Running as root (uid=0)");
    }
}

/// Check the system-wide files every report depends on
fn check_system_files(fs: &ProcFs) -> Result<(), ValidationError> {
    for name in ["stat", "meminfo", "uptime"] {
        let path = fs.system_file(name);
        match std::fs::metadata(&path) {
            Ok(_) => debug!("{} is present", path.display()),
            Err(e) => {
                error!("❌ Cannot access {}: {}", path.display(), e);
                return Err(ValidationError::MissingSystemFile(
                    path.display().to_string(),
                ));
            }
        }
    }

    if let Err(e) = fs.cpu_states() {
        error!("❌ CPU counters unreadable: {}", e);
        return Err(ValidationError::Unreadable(e.to_string()));
    }

    info!("✅ System counters readable under {}", fs.root().display());
    Ok(())
}

/// Check that at least one process entry can be enumerated
fn check_process_listing(fs: &ProcFs) -> Result<(), ValidationError> {
    let pids = fs
        .pids()
        .map_err(|e| ValidationError::Unreadable(e.to_string()))?;

    if pids.is_empty() {
        error!("❌ No process entries found under {}", fs.root().display());
        return Err(ValidationError::NoProcesses(fs.root().display().to_string()));
    }

    info!("✅ Found {} process entries", pids.len());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required file missing: {0}")]
    MissingSystemFile(String),

    #[error("Proc filesystem unreadable: {0}")]
    Unreadable(String),

    #[error("No process entries under {0}")]
    NoProcesses(String),
}
