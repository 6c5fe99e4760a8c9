//! Shared repository plumbing.
//!
//! The per-entity method families all reduce to the same handful of moves:
//! validate, stamp, write, or filter. Those moves live here once, generic
//! over the record type, with entity-specific rules passed in by the
//! callers. This is also where the modification clock lives.

use crate::error::{DataError, DataResult};
use crate::store::{StoredRecord, Table};
use chrono::{DateTime, Duration, Utc};
use pharmacy_types::RecordId;

/// Wall-clock source whose readings strictly increase.
///
/// `lastModified` must strictly grow across consecutive edits of the same
/// record; when two edits land within the same instant the second reading is
/// nudged forward by a millisecond.
#[derive(Debug, Default)]
pub(crate) struct MonotonicClock {
    last: Option<DateTime<Utc>>,
}

impl MonotonicClock {
    pub(crate) fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last {
            if now <= last {
                now = last + Duration::milliseconds(1);
            }
        }
        self.last = Some(now);
        now
    }
}

/// Fails with `NotFound` unless the table holds this identifier.
pub(crate) fn ensure_exists<R: StoredRecord>(
    table: &Table<R>,
    entity: &'static str,
    id: RecordId,
) -> DataResult<()> {
    if table.get(id).is_none() {
        return Err(DataError::NotFound { entity, id });
    }
    Ok(())
}

/// Validates, stamps and inserts a new record, returning its identifier.
pub(crate) fn create_record<R: StoredRecord>(
    table: &mut Table<R>,
    mut record: R,
    clock: &mut MonotonicClock,
    validate: impl FnOnce(&R) -> DataResult<()>,
) -> DataResult<RecordId> {
    validate(&record)?;
    record.mark_dirty(clock.now());
    table.add(record)
}

/// Applies an already-validated patch and re-stamps the record.
///
/// Existence must have been checked by the caller; an unknown identifier is
/// silently skipped here, matching the table's update contract.
pub(crate) fn apply_patch<R: StoredRecord>(
    table: &mut Table<R>,
    id: RecordId,
    clock: &mut MonotonicClock,
    apply: impl FnOnce(&mut R),
) -> DataResult<()> {
    let stamp = clock.now();
    table.update(id, |record| {
        apply(record);
        record.mark_dirty(stamp);
    })?;
    Ok(())
}

/// Deletes a record, failing with `NotFound` when it was never there.
pub(crate) fn remove_record<R: StoredRecord>(
    table: &mut Table<R>,
    entity: &'static str,
    id: RecordId,
) -> DataResult<()> {
    if !table.delete(id)? {
        return Err(DataError::NotFound { entity, id });
    }
    Ok(())
}

/// Runs a substring search over a table.
///
/// A blank query returns the full set unfiltered. Otherwise `matches` is
/// called per record with the lowercased needle.
pub(crate) fn filter_records<R: StoredRecord>(
    table: &Table<R>,
    query: &str,
    matches: impl Fn(&R, &str) -> bool,
) -> Vec<R> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return table.all();
    }

    let needle = trimmed.to_lowercase();
    table
        .all()
        .into_iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_readings_strictly_increase() {
        let mut clock = MonotonicClock::default();
        let mut previous = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }
}
