//! Check command implementation.

use herakles_sysmon::ProcFs;

use crate::startup_checks::validate_requirements;

/// Validates the proc filesystem and reports the outcome.
pub fn command_check(fs: &ProcFs) -> anyhow::Result<()> {
    println!("🔍 Checking Runtime Requirements");
    println!("================================\n");

    match validate_requirements(fs) {
        Ok(()) => {
            println!("✅ {} is usable", fs.root().display());
            Ok(())
        }
        Err(e) => {
            println!("❌ {}", e);
            Err(e.into())
        }
    }
}
