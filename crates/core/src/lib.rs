//! # Pharmacy Core
//!
//! Data layer for the pharmacy administration console.
//!
//! This crate contains the record store and the validating service the
//! console's screens call into:
//! - Keyed tables for patients, orders and medications with store-assigned
//!   identifiers, secondary indexes, and optional JSON snapshot persistence
//! - The [`PharmacyService`] method families: create/read/update/delete and
//!   search per entity, plus the referential guard on patient deletion
//! - Per-record sync-status bookkeeping and the simulated outbound sync pass
//!
//! **No presentation concerns**: rendering, routing and form wiring live in
//! the console; this crate only ever sees already-collected records and
//! patches.
//!
//! ## Usage
//!
//! ```no_run
//! use pharmacy_core::{CoreConfig, PharmacyService, RecordStore};
//!
//! # fn main() -> pharmacy_core::DataResult<()> {
//! let config = CoreConfig::on_disk("pharmacy_data")?;
//! let store = RecordStore::open(&config)?;
//! let mut service = PharmacyService::new(store, &config);
//!
//! for patient in service.search_patients("jane") {
//!     println!("{} <{}>", patient.name, patient.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod repositories;
pub mod store;
pub mod sync;
pub mod validation;

pub use config::{CoreConfig, StoreMode};
pub use error::{DataError, DataResult};
pub use repositories::{DashboardCounts, PharmacyService};
pub use store::{RecordStore, StoredRecord, Syncable, Table, TableSchema};
pub use sync::{
    AssumeOnline, Connectivity, SimulatedTransport, SyncReport, SyncTransport, TransportError,
};
