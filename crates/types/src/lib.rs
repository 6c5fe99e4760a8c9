//! # Pharmacy Types
//!
//! Shared entity models for the pharmacy record store.
//!
//! This crate defines the persisted shapes of the three record collections
//! (patients, orders, medications) plus the singleton pharmacy profile, the
//! record identifier newtype, and the partial-update ("patch") carriers the
//! data access service consumes.
//!
//! All persisted structs serialise with the console's camelCase wire names
//! (`dateOfBirth`, `syncStatus`, `lastModified`, ...) so snapshots written by
//! earlier builds of the console remain readable.
//!
//! **No storage or validation concerns**: enforcement of required fields and
//! cross-entity rules belongs to `pharmacy-core`.

pub mod id;
pub mod medication;
pub mod order;
pub mod patient;
pub mod profile;
pub mod sync;

pub use id::{IdError, RecordId};
pub use medication::{Medication, MedicationPatch, StockStatus};
pub use order::{Order, OrderItem, OrderPatch, OrderStatus, PaymentStatus};
pub use patient::{
    Address, Dependent, Gender, MedicalAid, Patient, PatientPatch, PatientStatus, PaymentMethod,
};
pub use profile::PharmacyProfile;
pub use sync::SyncStatus;
