//! Inventory (medication) operations.
//!
//! Medications get the same create/update/delete/search family as the other
//! entities. Their stock status is whatever the operator set it to; nothing
//! here derives it from the quantity on hand.

use crate::error::DataResult;
use crate::repositories::shared::{
    apply_patch, create_record, ensure_exists, filter_records, remove_record,
};
use crate::repositories::PharmacyService;
use crate::validation::{validate_medication_patch, validate_new_medication};
use pharmacy_types::{Medication, MedicationPatch, RecordId};

impl PharmacyService {
    /// Validates and stores a new inventory line, returning the assigned
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Validation` when a required field is blank or the
    /// price is negative.
    pub fn add_medication(&mut self, medication: Medication) -> DataResult<RecordId> {
        create_record(
            self.store.medications_mut(),
            medication,
            &mut self.clock,
            validate_new_medication,
        )
    }

    /// Merges a partial update into an existing inventory line and refreshes
    /// its modification stamp.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown identifier and
    /// `DataError::Validation` for blank patched fields.
    pub fn update_medication(&mut self, id: RecordId, patch: MedicationPatch) -> DataResult<()> {
        ensure_exists(self.store.medications(), "medication", id)?;
        validate_medication_patch(&patch)?;
        apply_patch(self.store.medications_mut(), id, &mut self.clock, |medication| {
            patch.apply(medication)
        })
    }

    /// Removes an inventory line.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown identifier.
    pub fn delete_medication(&mut self, id: RecordId) -> DataResult<()> {
        remove_record(self.store.medications_mut(), "medication", id)
    }

    /// The inventory line with this identifier, if stored.
    pub fn get_medication(&self, id: RecordId) -> Option<Medication> {
        self.store.medications().get(id)
    }

    /// Every inventory line, in insertion order.
    pub fn get_all_medications(&self) -> Vec<Medication> {
        self.store.medications().all()
    }

    /// Case-insensitive substring search over name, category and supplier.
    /// A blank query returns the full inventory.
    pub fn search_medications(&self, query: &str) -> Vec<Medication> {
        filter_records(self.store.medications(), query, |medication, needle| {
            medication.name.to_lowercase().contains(needle)
                || medication.category.to_lowercase().contains(needle)
                || medication.supplier.to_lowercase().contains(needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{memory_service, sample_medication};
    use super::*;
    use crate::error::DataError;
    use pharmacy_types::StockStatus;

    #[test]
    fn add_rejects_blank_required_fields() {
        let mut service = memory_service();

        let mut nameless = sample_medication("Paracetamol 500mg");
        nameless.name = "  ".to_string();
        assert!(matches!(
            service.add_medication(nameless),
            Err(DataError::Validation(_))
        ));

        let mut unsupplied = sample_medication("Paracetamol 500mg");
        unsupplied.supplier = String::new();
        assert!(matches!(
            service.add_medication(unsupplied),
            Err(DataError::Validation(_))
        ));

        assert!(service.get_all_medications().is_empty());
    }

    #[test]
    fn add_and_update_refresh_the_modification_stamp() {
        let mut service = memory_service();
        let id = service
            .add_medication(sample_medication("Paracetamol 500mg"))
            .expect("add medication");

        let stored = service.get_medication(id).expect("stored line");
        let before = stored.last_modified.expect("stamped");

        service
            .update_medication(
                id,
                MedicationPatch {
                    quantity: Some(8),
                    status: Some(StockStatus::LowStock),
                    ..Default::default()
                },
            )
            .expect("update medication");

        let updated = service.get_medication(id).expect("stored line");
        assert_eq!(updated.quantity, 8);
        assert_eq!(updated.status, StockStatus::LowStock);
        assert!(updated.last_modified.expect("stamped") > before);
    }

    #[test]
    fn update_unknown_line_fails_with_not_found() {
        let mut service = memory_service();
        let err = service
            .update_medication(
                RecordId::new(3).expect("positive id"),
                MedicationPatch::default(),
            )
            .expect_err("unknown id");
        assert!(matches!(err, DataError::NotFound { entity: "medication", .. }));
    }

    #[test]
    fn delete_removes_the_line() {
        let mut service = memory_service();
        let id = service
            .add_medication(sample_medication("Cetirizine 10mg"))
            .expect("add medication");

        service.delete_medication(id).expect("delete medication");
        assert!(service.get_medication(id).is_none());
        assert!(matches!(
            service.delete_medication(id),
            Err(DataError::NotFound { .. })
        ));
    }

    #[test]
    fn search_spans_name_category_and_supplier() {
        let mut service = memory_service();
        service
            .add_medication(sample_medication("Paracetamol 500mg"))
            .expect("add medication");
        let mut antihistamine = sample_medication("Cetirizine 10mg");
        antihistamine.category = "Antihistamine".to_string();
        antihistamine.supplier = "Baxter Labs".to_string();
        service.add_medication(antihistamine).expect("add medication");

        assert_eq!(service.search_medications("paraceta").len(), 1);
        assert_eq!(service.search_medications("ANTIHIST").len(), 1);
        assert_eq!(service.search_medications("baxter").len(), 1);
        assert_eq!(service.search_medications("").len(), 2);
        assert!(service.search_medications("nothing here").is_empty());
    }
}
