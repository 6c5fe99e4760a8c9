//! Per-record synchronisation status.

use serde::{Deserialize, Serialize};

/// Whether a record's local changes have been propagated to the (simulated)
/// remote system.
///
/// Lifecycle: every create or edit leaves the record `Pending`; a sync pass
/// flips it to `Synced` on success or `Error` on failure. Nothing moves a
/// record out of `Error` except a further local edit or the next sync pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Local changes have been pushed.
    Synced,
    /// Local changes are waiting for the next sync pass.
    #[default]
    Pending,
    /// The last push attempt for this record failed.
    Error,
}

impl SyncStatus {
    /// Wire-format string, as persisted in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Pending => "pending",
            SyncStatus::Error => "error",
        }
    }

    /// True when the record still needs a push: `Pending`, or `Error` from a
    /// previous pass (failed rows are retried on the next explicit sync).
    pub fn needs_push(self) -> bool {
        matches!(self, SyncStatus::Pending | SyncStatus::Error)
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
