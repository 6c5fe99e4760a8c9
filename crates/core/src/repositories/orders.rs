//! Order operations.
//!
//! Every order references an existing patient; creation and re-pointing
//! updates both check the reference. Deleting an order has no guard; it is
//! what unblocks deleting its patient.

use crate::error::DataResult;
use crate::repositories::shared::{apply_patch, create_record, ensure_exists, remove_record};
use crate::repositories::PharmacyService;
use crate::validation::{validate_new_order, validate_order_patch};
use pharmacy_types::{Order, OrderPatch, RecordId};

impl PharmacyService {
    /// Validates and stores a new order, returning the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` when the referenced patient does not
    /// exist and `DataError::Validation` for an empty or malformed item
    /// list. The store is untouched on failure.
    pub fn add_order(&mut self, order: Order) -> DataResult<RecordId> {
        ensure_exists(self.store.patients(), "patient", order.patient_id)?;
        create_record(
            self.store.orders_mut(),
            order,
            &mut self.clock,
            validate_new_order,
        )
    }

    /// Merges a partial update into an existing order.
    ///
    /// A patch that re-points `patient_id` must name an existing patient.
    /// On success the record is re-stamped pending with a fresh timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown order or patient and
    /// `DataError::Validation` for malformed patch fields.
    pub fn update_order(&mut self, id: RecordId, patch: OrderPatch) -> DataResult<()> {
        ensure_exists(self.store.orders(), "order", id)?;
        if let Some(patient_id) = patch.patient_id {
            ensure_exists(self.store.patients(), "patient", patient_id)?;
        }
        validate_order_patch(&patch)?;
        apply_patch(self.store.orders_mut(), id, &mut self.clock, |order| {
            patch.apply(order)
        })
    }

    /// Removes an order.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown identifier.
    pub fn delete_order(&mut self, id: RecordId) -> DataResult<()> {
        remove_record(self.store.orders_mut(), "order", id)
    }

    /// The order with this identifier, if stored.
    pub fn get_order(&self, id: RecordId) -> Option<Order> {
        self.store.orders().get(id)
    }

    /// Every order, in insertion order.
    pub fn get_all_orders(&self) -> Vec<Order> {
        self.store.orders().all()
    }

    /// Every order referencing the given patient.
    pub fn get_patient_orders(&self, patient_id: RecordId) -> Vec<Order> {
        self.store
            .orders()
            .where_equals("patientId", &patient_id.to_string())
    }

    /// Case-insensitive prefix search on the denormalized patient name.
    /// A blank query returns every order.
    pub fn search_orders(&self, query: &str) -> Vec<Order> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.store.orders().all();
        }
        self.store
            .orders()
            .where_starts_with_ignore_case("patientName", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{memory_service, sample_order, sample_patient};
    use super::*;
    use crate::error::DataError;
    use pharmacy_types::{OrderStatus, SyncStatus};

    #[test]
    fn add_requires_an_existing_patient() {
        let mut service = memory_service();
        let ghost = RecordId::new(12).expect("positive id");

        let err = service
            .add_order(sample_order(ghost, "Nobody"))
            .expect_err("unknown patient");
        assert!(matches!(err, DataError::NotFound { entity: "patient", .. }));
        assert!(service.get_all_orders().is_empty());
    }

    #[test]
    fn add_rejects_an_empty_item_list() {
        let mut service = memory_service();
        let patient_id = service.add_patient(sample_patient()).expect("add patient");

        let mut order = sample_order(patient_id, "Jane Doe");
        order.items.clear();
        let err = service.add_order(order).expect_err("empty items");
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn add_stamps_pending_and_returns_the_id() {
        let mut service = memory_service();
        let patient_id = service.add_patient(sample_patient()).expect("add patient");
        let id = service
            .add_order(sample_order(patient_id, "Jane Doe"))
            .expect("add order");

        let stored = service.get_order(id).expect("stored order");
        assert_eq!(stored.sync_status, SyncStatus::Pending);
        assert_eq!(stored.patient_id, patient_id);
    }

    #[test]
    fn update_restamps_and_checks_a_repointed_patient() {
        let mut service = memory_service();
        let patient_id = service.add_patient(sample_patient()).expect("add patient");
        let id = service
            .add_order(sample_order(patient_id, "Jane Doe"))
            .expect("add order");
        service.sync_records().expect("sync");

        let err = service
            .update_order(
                id,
                OrderPatch {
                    patient_id: Some(RecordId::new(40).expect("positive id")),
                    ..Default::default()
                },
            )
            .expect_err("unknown patient");
        assert!(matches!(err, DataError::NotFound { entity: "patient", .. }));

        service
            .update_order(
                id,
                OrderPatch {
                    order_status: Some(OrderStatus::Completed),
                    ..Default::default()
                },
            )
            .expect("update order");

        let updated = service.get_order(id).expect("stored order");
        assert_eq!(updated.order_status, OrderStatus::Completed);
        assert_eq!(updated.sync_status, SyncStatus::Pending);
    }

    #[test]
    fn patient_orders_come_back_by_reference() {
        let mut service = memory_service();
        let jane = service.add_patient(sample_patient()).expect("add patient");
        let mut other = sample_patient();
        other.name = "John Roe".to_string();
        other.email = "john@example.com".to_string();
        let john = service.add_patient(other).expect("add patient");

        service.add_order(sample_order(jane, "Jane Doe")).expect("add order");
        service.add_order(sample_order(jane, "Jane Doe")).expect("add order");
        service.add_order(sample_order(john, "John Roe")).expect("add order");

        assert_eq!(service.get_patient_orders(jane).len(), 2);
        assert_eq!(service.get_patient_orders(john).len(), 1);
    }

    #[test]
    fn search_prefixes_on_patient_name_ignoring_case() {
        let mut service = memory_service();
        let jane = service.add_patient(sample_patient()).expect("add patient");
        let mut other = sample_patient();
        other.name = "John Roe".to_string();
        other.email = "john@example.com".to_string();
        let john = service.add_patient(other).expect("add patient");

        service.add_order(sample_order(jane, "Jane Doe")).expect("add order");
        service.add_order(sample_order(john, "John Roe")).expect("add order");

        assert_eq!(service.search_orders("ja").len(), 1);
        assert_eq!(service.search_orders("Jo").len(), 1);
        // Substrings that are not prefixes do not match.
        assert!(service.search_orders("doe").is_empty());
        assert_eq!(service.search_orders("").len(), 2);
    }
}
