use super::PowerSystem;
use crate::error::Result;
use crate::types::estimation::ReachEstimation;
use crate::types::privilege::{Privilege, PrivilegeScope, PrivilegeSet};

/// Fixed confidence for every file-permission system.
pub const FILESYSTEM_CONFIDENCE: f64 = 0.95;
const MAX_IMPACT_PER_ACTION: u64 = 10;

#[derive(Debug, Clone)]
pub struct FileSystemExample {
    name: String,
    privileges: PrivilegeSet,
}

impl FileSystemExample {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: "File System Permissions".to_string(),
            privileges: stock_privileges()?,
        })
    }

    /// Same estimation formula over an arbitrary privilege set.
    #[cfg(test)]
    pub fn with_privileges(name: impl Into<String>, privileges: PrivilegeSet) -> Self {
        Self {
            name: name.into(),
            privileges,
        }
    }
}

fn stock_privileges() -> Result<PrivilegeSet> {
    let privileges = [
        (
            "READ",
            PrivilegeScope::Limited,
            &["open", "read", "list"][..],
            [
                "Only files with the owner, group or other read bit set",
                "Cannot read outside the mounted volume",
                "Max 1024 open file descriptors per process",
            ],
        ),
        (
            "WRITE",
            PrivilegeScope::Limited,
            &["write", "append", "truncate"][..],
            [
                "Only files with the write bit set for the caller",
                "Disk quota limits total bytes written",
                "Read-only mounts reject every write",
            ],
        ),
        (
            "EXECUTE",
            PrivilegeScope::Restricted,
            &["execute", "run"][..],
            [
                "Requires the execute bit on the file",
                "noexec mounts block execution",
                "Runs with the caller's uid, never elevated",
            ],
        ),
    ]
    .into_iter()
    .map(|(name, scope, actions, limitations)| {
        Privilege::new(name, scope, actions.iter().copied(), limitations)
    })
    .collect::<Result<Vec<_>>>()?;

    PrivilegeSet::new(privileges)
}

impl PowerSystem for FileSystemExample {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "POSIX-style read, write and execute bits on a single volume."
    }

    fn privileges(&self) -> PrivilegeSet {
        self.privileges.clone()
    }

    fn estimate_minimum_reach(&self) -> Result<ReachEstimation> {
        let actions = self.privileges.action_count() as u64;
        let limitations = self.privileges.limitations().len();
        let reasoning = format!(
            "{} privileges grant {} distinct actions, bounded by {} explicit limitations.",
            self.privileges.len(),
            actions,
            limitations
        );

        ReachEstimation::new(
            true,
            actions,
            actions.saturating_mul(MAX_IMPACT_PER_ACTION),
            FILESYSTEM_CONFIDENCE,
            reasoning,
        )
    }
}
