//! Patient operations.
//!
//! Patients carry the strictest rules of the three entities: full intake
//! validation on create, contact re-validation on update, and a referential
//! guard on delete: a patient with orders on file cannot be removed.

use crate::error::{DataError, DataResult};
use crate::repositories::shared::{
    apply_patch, create_record, ensure_exists, filter_records, remove_record,
};
use crate::repositories::PharmacyService;
use crate::validation::{validate_new_patient, validate_patient_patch};
use pharmacy_types::{Patient, PatientPatch, RecordId};

impl PharmacyService {
    /// Validates and stores a new patient, returning the assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Validation` when a required intake field is blank
    /// or the email/phone fails its format check. The store is untouched on
    /// failure.
    pub fn add_patient(&mut self, patient: Patient) -> DataResult<RecordId> {
        create_record(
            self.store.patients_mut(),
            patient,
            &mut self.clock,
            validate_new_patient,
        )
    }

    /// Merges a partial update into an existing patient.
    ///
    /// Email and phone are re-validated only when the patch carries them.
    /// On success the record is re-stamped pending with a fresh timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown identifier and
    /// `DataError::Validation` for a malformed contact field.
    pub fn update_patient(&mut self, id: RecordId, patch: PatientPatch) -> DataResult<()> {
        ensure_exists(self.store.patients(), "patient", id)?;
        validate_patient_patch(&patch)?;
        apply_patch(self.store.patients_mut(), id, &mut self.clock, |patient| {
            patch.apply(patient)
        })
    }

    /// Removes a patient with no orders on file.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` for an unknown identifier and
    /// `DataError::Conflict` while any order still references the patient.
    pub fn delete_patient(&mut self, id: RecordId) -> DataResult<()> {
        ensure_exists(self.store.patients(), "patient", id)?;

        let orders_on_file = self
            .store
            .orders()
            .where_equals("patientId", &id.to_string())
            .len();
        if orders_on_file > 0 {
            return Err(DataError::Conflict(format!(
                "patient {id} still has {orders_on_file} order(s) on file"
            )));
        }

        remove_record(self.store.patients_mut(), "patient", id)
    }

    /// The patient with this identifier, if stored.
    pub fn get_patient(&self, id: RecordId) -> Option<Patient> {
        self.store.patients().get(id)
    }

    /// Every patient, in insertion order.
    pub fn get_all_patients(&self) -> Vec<Patient> {
        self.store.patients().all()
    }

    /// Case-insensitive substring search over name and email, plus a raw
    /// substring match on the phone number. A blank query returns everyone.
    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        filter_records(self.store.patients(), query, |patient, needle| {
            patient.name.to_lowercase().contains(needle)
                || patient.phone.contains(needle)
                || patient.email.to_lowercase().contains(needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{memory_service, sample_order, sample_patient};
    use super::*;
    use pharmacy_types::{PatientStatus, SyncStatus};

    #[test]
    fn add_assigns_a_positive_id_and_stamps_pending() {
        let mut service = memory_service();
        let id = service.add_patient(sample_patient()).expect("add patient");
        assert!(id.get() >= 1);

        let stored = service.get_patient(id).expect("stored patient");
        assert_eq!(stored.sync_status, SyncStatus::Pending);
        assert!(stored.last_modified.is_some());
    }

    #[test]
    fn add_rejects_any_blank_required_field() {
        let blank_name = {
            let mut p = sample_patient();
            p.name = "  ".to_string();
            p
        };
        let blank_dob = {
            let mut p = sample_patient();
            p.date_of_birth = String::new();
            p
        };
        let blank_phone = {
            let mut p = sample_patient();
            p.phone = String::new();
            p
        };
        let blank_email = {
            let mut p = sample_patient();
            p.email = String::new();
            p
        };
        let blank_street = {
            let mut p = sample_patient();
            p.address.street = String::new();
            p
        };
        let blank_city = {
            let mut p = sample_patient();
            p.address.city = String::new();
            p
        };

        let mut service = memory_service();
        for patient in [
            blank_name,
            blank_dob,
            blank_phone,
            blank_email,
            blank_street,
            blank_city,
        ] {
            let err = service.add_patient(patient).expect_err("blank field");
            assert!(matches!(err, DataError::Validation(_)));
        }
        assert!(service.get_all_patients().is_empty(), "store must be unchanged");
    }

    #[test]
    fn add_rejects_malformed_contact_fields() {
        let mut service = memory_service();

        let mut bad_email = sample_patient();
        bad_email.email = "jane-at-example.com".to_string();
        assert!(matches!(
            service.add_patient(bad_email),
            Err(DataError::Validation(_))
        ));

        let mut short_phone = sample_patient();
        short_phone.phone = "555-1234".to_string();
        assert!(matches!(
            service.add_patient(short_phone),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn update_unknown_patient_fails_with_not_found() {
        let mut service = memory_service();
        let err = service
            .update_patient(
                RecordId::new(99).expect("positive id"),
                PatientPatch::default(),
            )
            .expect_err("unknown id");
        assert!(matches!(err, DataError::NotFound { entity: "patient", .. }));
    }

    #[test]
    fn update_restamps_pending_and_advances_last_modified() {
        let mut service = memory_service();
        let id = service.add_patient(sample_patient()).expect("add patient");
        service.sync_records().expect("sync");

        let synced = service.get_patient(id).expect("stored patient");
        assert_eq!(synced.sync_status, SyncStatus::Synced);
        let before = synced.last_modified.expect("stamped");

        service
            .update_patient(
                id,
                PatientPatch {
                    status: Some(PatientStatus::Inactive),
                    ..Default::default()
                },
            )
            .expect("update patient");

        let updated = service.get_patient(id).expect("stored patient");
        assert_eq!(updated.status, PatientStatus::Inactive);
        assert_eq!(updated.sync_status, SyncStatus::Pending);
        assert!(updated.last_modified.expect("stamped") > before);
    }

    #[test]
    fn update_revalidates_contact_fields_only_when_present() {
        let mut service = memory_service();
        let id = service.add_patient(sample_patient()).expect("add patient");

        let err = service
            .update_patient(
                id,
                PatientPatch {
                    email: Some("broken@".to_string()),
                    ..Default::default()
                },
            )
            .expect_err("bad email");
        assert!(matches!(err, DataError::Validation(_)));

        // A patch without contact fields passes untouched.
        service
            .update_patient(
                id,
                PatientPatch {
                    medical_history: Some("asthma".to_string()),
                    ..Default::default()
                },
            )
            .expect("update history");
        assert_eq!(
            service.get_patient(id).expect("stored patient").medical_history,
            "asthma"
        );
    }

    #[test]
    fn delete_is_blocked_while_orders_reference_the_patient() {
        let mut service = memory_service();
        let patient_id = service.add_patient(sample_patient()).expect("add patient");
        let order_id = service
            .add_order(sample_order(patient_id, "Jane Doe"))
            .expect("add order");

        let err = service.delete_patient(patient_id).expect_err("guarded delete");
        assert!(matches!(err, DataError::Conflict(_)));
        assert!(service.get_patient(patient_id).is_some());

        service.delete_order(order_id).expect("delete order");
        service.delete_patient(patient_id).expect("delete patient");
        assert!(service.get_patient(patient_id).is_none());
    }

    #[test]
    fn delete_unknown_patient_fails_with_not_found() {
        let mut service = memory_service();
        let err = service
            .delete_patient(RecordId::new(7).expect("positive id"))
            .expect_err("unknown id");
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn blank_search_returns_the_full_set() {
        let mut service = memory_service();
        service.add_patient(sample_patient()).expect("add patient");
        let mut second = sample_patient();
        second.name = "John Roe".to_string();
        second.email = "john@example.com".to_string();
        service.add_patient(second).expect("add patient");

        let ids = |patients: Vec<Patient>| -> Vec<RecordId> {
            patients.into_iter().filter_map(|p| p.id).collect()
        };

        assert_eq!(
            ids(service.search_patients("")),
            ids(service.get_all_patients())
        );
        assert_eq!(ids(service.search_patients("   ")).len(), 2);
    }

    #[test]
    fn search_matches_name_phone_and_email() {
        let mut service = memory_service();
        service.add_patient(sample_patient()).expect("add patient");
        let mut second = sample_patient();
        second.name = "John Roe".to_string();
        second.phone = "021 444 2211".to_string();
        second.email = "roe@clinic.example".to_string();
        service.add_patient(second).expect("add patient");

        assert_eq!(service.search_patients("JANE").len(), 1);
        assert_eq!(service.search_patients("444 22").len(), 1);
        assert_eq!(service.search_patients("clinic.example").len(), 1);
        assert!(service.search_patients("no such patient").is_empty());
    }
}
