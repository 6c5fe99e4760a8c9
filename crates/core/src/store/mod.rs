//! The local record store.
//!
//! Each entity type lives in its own keyed [`Table`]: insertion assigns a
//! positive, monotonically increasing identifier, and declared secondary
//! indexes serve equality and prefix lookups. Tables are served from memory
//! and, in on-disk mode, snapshotted to one JSON file per table after
//! every mutation, so no partial-write state is ever observable.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   patients.json      # TableSnapshot: schema version, next-id watermark, rows
//!   orders.json
//!   medications.json
//!   profile.json       # singleton pharmacy profile
//! ```
//!
//! A snapshot stamped with a different schema version than the compiled one
//! is discarded at open and the table starts empty.
//!
//! **No validation concerns**: tables store whatever they are given. Field
//! rules and cross-entity guards live in the service layer, which is the
//! only caller of these types.

mod profile;
mod records;
mod table;

pub use table::Table;

use crate::config::{CoreConfig, StoreMode};
use crate::error::{DataError, DataResult};
use chrono::{DateTime, Utc};
use pharmacy_types::{Medication, Order, Patient, RecordId, SyncStatus};
use profile::ProfileSlot;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;

/// Static description of one table: its name (also the snapshot file stem),
/// the schema version its rows are written under, and its secondary indexes.
#[derive(Clone, Copy, Debug)]
pub struct TableSchema {
    pub name: &'static str,
    pub version: u32,
    pub indexes: &'static [&'static str],
}

/// A record type the store can hold.
///
/// Implementations bind an entity to its table schema and expose the
/// bookkeeping fields the store and service maintain.
pub trait StoredRecord: Clone + Serialize + DeserializeOwned {
    /// The table this record type lives in.
    const SCHEMA: TableSchema;

    /// The store-assigned identifier, if this record has been inserted.
    fn id(&self) -> Option<RecordId>;

    /// Called by the table on insertion.
    fn set_id(&mut self, id: RecordId);

    /// The key this record contributes to the named secondary index.
    fn index_value(&self, index: &str) -> Option<String>;

    /// Stamps the record as locally modified at `at`. Entities that take
    /// part in sync also reset their status to pending here.
    fn mark_dirty(&mut self, at: DateTime<Utc>);
}

/// A record type covered by the outbound sync pass.
pub trait Syncable: StoredRecord {
    fn sync_status(&self) -> SyncStatus;

    /// Store-level status flip. Unlike [`StoredRecord::mark_dirty`] this
    /// must not touch `last_modified`: a successful push is not a local
    /// edit.
    fn set_sync_status(&mut self, status: SyncStatus);
}

/// The three entity tables plus the singleton profile, opened together.
pub struct RecordStore {
    patients: Table<Patient>,
    orders: Table<Order>,
    medications: Table<Medication>,
    profile: ProfileSlot,
}

impl RecordStore {
    /// Opens (and in on-disk mode, loads) the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the data directory cannot be
    /// created, and the usual persistence errors if a snapshot exists but
    /// cannot be read.
    pub fn open(config: &CoreConfig) -> DataResult<Self> {
        if let StoreMode::OnDisk(dir) = config.store_mode() {
            fs::create_dir_all(dir).map_err(DataError::StoreUnavailable)?;
        }

        let store = Self {
            patients: Table::open(config.store_mode())?,
            orders: Table::open(config.store_mode())?,
            medications: Table::open(config.store_mode())?,
            profile: ProfileSlot::open(config.store_mode())?,
        };

        tracing::debug!(
            patients = store.patients.len(),
            orders = store.orders.len(),
            medications = store.medications.len(),
            "record store opened"
        );

        Ok(store)
    }

    pub(crate) fn patients(&self) -> &Table<Patient> {
        &self.patients
    }

    pub(crate) fn patients_mut(&mut self) -> &mut Table<Patient> {
        &mut self.patients
    }

    pub(crate) fn orders(&self) -> &Table<Order> {
        &self.orders
    }

    pub(crate) fn orders_mut(&mut self) -> &mut Table<Order> {
        &mut self.orders
    }

    pub(crate) fn medications(&self) -> &Table<Medication> {
        &self.medications
    }

    pub(crate) fn medications_mut(&mut self) -> &mut Table<Medication> {
        &mut self.medications
    }

    pub(crate) fn profile(&self) -> &ProfileSlot {
        &self.profile
    }

    pub(crate) fn profile_mut(&mut self) -> &mut ProfileSlot {
        &mut self.profile
    }
}
