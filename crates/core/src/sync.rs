//! Simulated outbound synchronisation.
//!
//! There is no real remote system: the default transport sleeps a fixed
//! delay per record and reports success, standing in for the network call a
//! future backend would receive. The bookkeeping around it is real: which
//! records get collected, how their status flips, and the guarantee that one
//! bad record never aborts the rest of the batch.
//!
//! The pass collects every patient and order whose status still needs a
//! push (`pending`, plus `error` rows from earlier passes, which are retried
//! on each explicit sync) and pushes them one at a time. Status flips are
//! store-level writes that leave `lastModified` alone: a push is not a
//! local edit.

use crate::error::DataResult;
use crate::store::{Syncable, Table};
use pharmacy_types::{RecordId, SyncStatus};
use std::time::Duration;

/// Decides whether a sync pass may start.
///
/// The console checks the browser's connectivity flag before syncing; the
/// library takes the probe as an injected dependency instead.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Probe for environments without a connectivity signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// A transport rejection for one record.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Pushes one record to the (simulated) remote system.
pub trait SyncTransport {
    /// Attempts to push the record identified by `table`/`id`.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the push fails; the sync pass flips
    /// that record to `error` status and moves on.
    fn push(&mut self, table: &'static str, id: RecordId) -> Result<(), TransportError>;
}

/// The stand-in transport: waits the configured delay, then succeeds.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SyncTransport for SimulatedTransport {
    fn push(&mut self, _table: &'static str, _id: RecordId) -> Result<(), TransportError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}

/// Outcome counts of one sync pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Records collected for pushing.
    pub attempted: usize,
    /// Records flipped to `synced`.
    pub synced: usize,
    /// Records flipped to `error`.
    pub failed: usize,
}

/// Pushes every record of one table that still needs it, serially.
///
/// Per-record failures are captured as `error` status and logged, never
/// propagated, so the batch always runs to completion.
pub(crate) fn push_unsynced<R: Syncable>(
    table: &mut Table<R>,
    transport: &mut dyn SyncTransport,
    report: &mut SyncReport,
) -> DataResult<()> {
    let queued: Vec<RecordId> = table
        .where_equals("syncStatus", SyncStatus::Pending.as_str())
        .into_iter()
        .chain(table.where_equals("syncStatus", SyncStatus::Error.as_str()))
        .filter_map(|record| record.id())
        .collect();

    for id in queued {
        report.attempted += 1;
        match transport.push(R::SCHEMA.name, id) {
            Ok(()) => {
                table.update(id, |record| record.set_sync_status(SyncStatus::Synced))?;
                report.synced += 1;
            }
            Err(err) => {
                tracing::warn!(table = R::SCHEMA.name, %id, error = %err, "record push failed");
                table.update(id, |record| record.set_sync_status(SyncStatus::Error))?;
                report.failed += 1;
            }
        }
    }

    Ok(())
}
