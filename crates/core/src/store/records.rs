//! Table bindings for the pharmacy entities.
//!
//! The declared indexes mirror the lookups the service actually performs:
//! sync collects by `syncStatus`, the referential guard and order listing go
//! through `patientId`, and order search prefixes on `patientName`. The
//! remaining entries back the browse screens.

use crate::constants::{MEDICATIONS_TABLE, ORDERS_TABLE, PATIENTS_TABLE, SCHEMA_VERSION};
use crate::store::{StoredRecord, Syncable, TableSchema};
use chrono::{DateTime, Utc};
use pharmacy_types::{Medication, Order, Patient, RecordId, SyncStatus};

impl StoredRecord for Patient {
    const SCHEMA: TableSchema = TableSchema {
        name: PATIENTS_TABLE,
        version: SCHEMA_VERSION,
        indexes: &["name", "phone", "email", "status", "syncStatus"],
    };

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "name" => Some(self.name.clone()),
            "phone" => Some(self.phone.clone()),
            "email" => Some(self.email.clone()),
            "status" => Some(self.status.as_str().to_string()),
            "syncStatus" => Some(self.sync_status.as_str().to_string()),
            _ => None,
        }
    }

    fn mark_dirty(&mut self, at: DateTime<Utc>) {
        self.sync_status = SyncStatus::Pending;
        self.last_modified = Some(at);
    }
}

impl Syncable for Patient {
    fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }

    fn set_sync_status(&mut self, status: SyncStatus) {
        self.sync_status = status;
    }
}

impl StoredRecord for Order {
    const SCHEMA: TableSchema = TableSchema {
        name: ORDERS_TABLE,
        version: SCHEMA_VERSION,
        indexes: &["patientId", "patientName", "orderStatus", "syncStatus"],
    };

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "patientId" => Some(self.patient_id.to_string()),
            "patientName" => Some(self.patient_name.clone()),
            "orderStatus" => Some(self.order_status.as_str().to_string()),
            "syncStatus" => Some(self.sync_status.as_str().to_string()),
            _ => None,
        }
    }

    fn mark_dirty(&mut self, at: DateTime<Utc>) {
        self.sync_status = SyncStatus::Pending;
        self.last_modified = Some(at);
    }
}

impl Syncable for Order {
    fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }

    fn set_sync_status(&mut self, status: SyncStatus) {
        self.sync_status = status;
    }
}

impl StoredRecord for Medication {
    const SCHEMA: TableSchema = TableSchema {
        name: MEDICATIONS_TABLE,
        version: SCHEMA_VERSION,
        indexes: &["name", "category", "status"],
    };

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn index_value(&self, index: &str) -> Option<String> {
        match index {
            "name" => Some(self.name.clone()),
            "category" => Some(self.category.clone()),
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    // Medications sit outside the sync pass, so dirtying one only refreshes
    // its modification stamp.
    fn mark_dirty(&mut self, at: DateTime<Utc>) {
        self.last_modified = Some(at);
    }
}
