//! Uid to user name resolution against the passwd database file.

use crate::error::ProbeError;
use crate::parser::lossy_lines;
use crate::procfs::ProcFs;
use ahash::AHashMap as HashMap;
use std::path::Path;

/// Splits a passwd record into (name, uid). Comments and short records yield `None`.
fn parse_passwd_record(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') {
        return None;
    }
    let mut fields = line.split(':');
    let name = fields.next()?;
    let _password = fields.next()?;
    let uid = fields.next()?;
    if name.is_empty() {
        return None;
    }
    Some((name, uid))
}

/// Passwd file loaded once, for resolving many pids in one listing.
#[derive(Debug, Clone, Default)]
pub struct PasswdTable {
    by_uid: HashMap<String, String>,
}

impl PasswdTable {
    pub fn load(path: &Path) -> Result<Self, ProbeError> {
        let bytes = std::fs::read(path).map_err(|e| ProbeError::io(path, e))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(content: &str) -> Self {
        let mut by_uid = HashMap::new();
        for (name, uid) in content.lines().filter_map(parse_passwd_record) {
            // First record wins, matching a sequential scan
            by_uid
                .entry(uid.to_string())
                .or_insert_with(|| name.to_string());
        }
        Self { by_uid }
    }

    pub fn name(&self, uid: &str) -> Option<&str> {
        self.by_uid.get(uid).map(String::as_str)
    }
}

impl ProcFs {
    /// Scans the passwd file for the first record whose uid field equals `uid`.
    pub fn user_name_for_uid(&self, uid: &str) -> Result<Option<String>, ProbeError> {
        let path = self.passwd_path();
        let reader = self.open(path)?;
        for line in lossy_lines(reader) {
            let line = line.map_err(|e| ProbeError::io(path, e))?;
            if let Some((name, record_uid)) = parse_passwd_record(&line) {
                if record_uid == uid {
                    return Ok(Some(name.to_string()));
                }
            }
        }
        Ok(None)
    }

    /// Name of the user owning `pid`; empty when the uid has no passwd entry.
    pub fn user(&self, pid: u32) -> Result<String, ProbeError> {
        let uid = self.uid(pid)?;
        Ok(self.user_name_for_uid(&uid)?.unwrap_or_default())
    }

    pub fn passwd_table(&self) -> Result<PasswdTable, ProbeError> {
        PasswdTable::load(self.passwd_path())
    }
}
