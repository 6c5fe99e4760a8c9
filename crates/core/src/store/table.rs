//! Keyed record tables with snapshot persistence and secondary indexes.

use crate::config::StoreMode;
use crate::error::{DataError, DataResult};
use crate::store::StoredRecord;
use pharmacy_types::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk form of one table: the schema version it was written under, the
/// next-id watermark, and the rows themselves.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: serde::de::DeserializeOwned"))]
struct TableSnapshot<R> {
    schema_version: u32,
    next_id: RecordId,
    rows: Vec<R>,
}

/// Version probe, decoded before the rows so a snapshot from a different
/// schema can be discarded without trying to parse its rows.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotHeader {
    schema_version: u32,
}

/// One keyed collection of records.
///
/// Identifiers are assigned on insertion, starting at 1, and are never
/// reused: the watermark survives deletes and, in on-disk mode, restarts.
/// Iteration order (`all`) is identifier order, which equals insertion
/// order.
pub struct Table<R: StoredRecord> {
    rows: BTreeMap<RecordId, R>,
    next_id: RecordId,
    indexes: BTreeMap<&'static str, BTreeMap<String, Vec<RecordId>>>,
    file: Option<PathBuf>,
}

impl<R: StoredRecord> Table<R> {
    /// Opens the table for the given store mode, loading the existing
    /// snapshot when one is present on disk.
    pub fn open(mode: &StoreMode) -> DataResult<Self> {
        let file = match mode {
            StoreMode::InMemory => None,
            StoreMode::OnDisk(dir) => Some(dir.join(format!("{}.json", R::SCHEMA.name))),
        };

        let mut table = Self {
            rows: BTreeMap::new(),
            next_id: RecordId::first(),
            indexes: BTreeMap::new(),
            file,
        };

        if let Some(path) = table.file.clone() {
            if path.is_file() {
                table.load(&path)?;
            }
        }

        Ok(table)
    }

    fn load(&mut self, path: &Path) -> DataResult<()> {
        let contents = fs::read_to_string(path).map_err(DataError::FileRead)?;

        let header: SnapshotHeader =
            serde_json::from_str(&contents).map_err(DataError::Deserialization)?;
        if header.schema_version != R::SCHEMA.version {
            tracing::warn!(
                table = R::SCHEMA.name,
                found = header.schema_version,
                expected = R::SCHEMA.version,
                "discarding snapshot written under a different schema version"
            );
            return Ok(());
        }

        let snapshot: TableSnapshot<R> =
            serde_json::from_str(&contents).map_err(DataError::Deserialization)?;

        for record in snapshot.rows {
            let Some(id) = record.id() else {
                tracing::warn!(
                    table = R::SCHEMA.name,
                    "skipping stored row without an identifier"
                );
                continue;
            };
            self.insert_into_indexes(id, &record);
            self.rows.insert(id, record);
        }

        let past_rows = self
            .rows
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or_else(RecordId::first);
        self.next_id = past_rows.max(snapshot.next_id);

        Ok(())
    }

    /// Assigns the next identifier, inserts the record and persists.
    pub fn add(&mut self, mut record: R) -> DataResult<RecordId> {
        let id = self.next_id;
        self.next_id = id.next();

        record.set_id(id);
        self.insert_into_indexes(id, &record);
        self.rows.insert(id, record);
        self.save()?;

        Ok(id)
    }

    /// Returns a copy of the record with this identifier.
    pub fn get(&self, id: RecordId) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    /// Applies `f` to the stored record, re-indexes and persists.
    ///
    /// Returns `Ok(false)` without touching anything when the identifier is
    /// unknown; callers that need a hard failure check existence first.
    pub fn update(&mut self, id: RecordId, f: impl FnOnce(&mut R)) -> DataResult<bool> {
        let Some(mut record) = self.rows.remove(&id) else {
            return Ok(false);
        };

        self.remove_from_indexes(id, &record);
        f(&mut record);
        self.insert_into_indexes(id, &record);
        self.rows.insert(id, record);
        self.save()?;

        Ok(true)
    }

    /// Removes the record with this identifier, if present.
    pub fn delete(&mut self, id: RecordId) -> DataResult<bool> {
        let Some(record) = self.rows.remove(&id) else {
            return Ok(false);
        };

        self.remove_from_indexes(id, &record);
        self.save()?;

        Ok(true)
    }

    /// All records in insertion order.
    pub fn all(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records whose declared index key equals `key` exactly.
    pub fn where_equals(&self, index: &'static str, key: &str) -> Vec<R> {
        debug_assert!(
            R::SCHEMA.indexes.contains(&index),
            "{index} is not an index of {}",
            R::SCHEMA.name
        );

        let Some(ids) = self.indexes.get(index).and_then(|keys| keys.get(key)) else {
            return Vec::new();
        };

        ids.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Records whose declared index key starts with `prefix`, compared
    /// case-insensitively. Results come back in key order.
    pub fn where_starts_with_ignore_case(&self, index: &'static str, prefix: &str) -> Vec<R> {
        debug_assert!(
            R::SCHEMA.indexes.contains(&index),
            "{index} is not an index of {}",
            R::SCHEMA.name
        );

        let Some(keys) = self.indexes.get(index) else {
            return Vec::new();
        };

        let needle = prefix.to_lowercase();
        let mut matches = Vec::new();
        for (key, ids) in keys {
            if key.to_lowercase().starts_with(&needle) {
                matches.extend(ids.iter().filter_map(|id| self.get(*id)));
            }
        }
        matches
    }

    fn insert_into_indexes(&mut self, id: RecordId, record: &R) {
        for &index in R::SCHEMA.indexes {
            if let Some(key) = record.index_value(index) {
                self.indexes
                    .entry(index)
                    .or_default()
                    .entry(key)
                    .or_default()
                    .push(id);
            }
        }
    }

    fn remove_from_indexes(&mut self, id: RecordId, record: &R) {
        for &index in R::SCHEMA.indexes {
            let Some(key) = record.index_value(index) else {
                continue;
            };
            let Some(keys) = self.indexes.get_mut(index) else {
                continue;
            };
            if let Some(ids) = keys.get_mut(&key) {
                ids.retain(|existing| *existing != id);
                if ids.is_empty() {
                    keys.remove(&key);
                }
            }
        }
    }

    /// Writes the snapshot file via a temp file and rename, so readers never
    /// observe a half-written snapshot. No-op in memory mode.
    fn save(&self) -> DataResult<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        let snapshot = TableSnapshot {
            schema_version: R::SCHEMA.version,
            next_id: self.next_id,
            rows: self.rows.values().cloned().collect::<Vec<_>>(),
        };

        let json = serde_json::to_string_pretty(&snapshot).map_err(DataError::Serialization)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(DataError::FileWrite)?;
        fs::rename(&tmp, path).map_err(DataError::FileWrite)?;

        Ok(())
    }
}
