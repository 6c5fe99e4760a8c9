//! Patient records.
//!
//! This module defines the persisted patient shape together with its nested
//! structures (postal address, medical-aid cover, dependents) and the patch
//! carrier used for partial updates.
//!
//! Notes:
//! - Dates of birth and expiry dates are kept as entered (ISO `YYYY-MM-DD`
//!   strings); only `lastModified` is a real timestamp.
//! - `id`, `syncStatus` and `lastModified` are bookkeeping fields owned by
//!   the store and service; callers leave `id` unset on new records.

use crate::id::RecordId;
use crate::sync::SyncStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// Patient gender as captured on the intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// How a patient settles their account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MedicalAid,
    Cash,
    CreditCard,
}

/// Whether a patient is an active customer of the pharmacy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

impl PatientStatus {
    /// Wire-format string, as persisted in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
        }
    }
}

// ============================================================================
// Nested structures
// ============================================================================

/// Structured postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A dependent covered by a patient's medical-aid plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub name: String,
    pub relationship: String,
    pub date_of_birth: String,
}

/// Medical-aid cover details, present when the patient pays via medical aid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalAid {
    pub provider: String,
    pub policy_number: String,
    pub group_number: String,
    pub membership_number: String,
    pub plan_type: String,
    pub expiry_date: String,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
    pub co_pay_percentage: f64,
    pub annual_limit: f64,
    pub remaining_balance: f64,
}

// ============================================================================
// Patient record
// ============================================================================

/// A patient record as held in the store.
///
/// New records are built with `id: None`; the store assigns the identifier
/// on insertion and the service stamps `sync_status`/`last_modified`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: Address,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_aid: Option<MedicalAid>,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default)]
    pub sync_status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

// ============================================================================
// Partial update carrier
// ============================================================================

/// Field-wise partial update for a patient record.
///
/// Only fields set to `Some` are written; everything else keeps its stored
/// value. The service re-validates `email` and `phone` when they appear.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_aid: Option<MedicalAid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
}

impl PatientPatch {
    /// Merges the set fields of this patch into `patient`.
    pub fn apply(self, patient: &mut Patient) {
        if let Some(name) = self.name {
            patient.name = name;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        if let Some(phone) = self.phone {
            patient.phone = phone;
        }
        if let Some(email) = self.email {
            patient.email = email;
        }
        if let Some(address) = self.address {
            patient.address = address;
        }
        if let Some(medical_history) = self.medical_history {
            patient.medical_history = medical_history;
        }
        if let Some(allergies) = self.allergies {
            patient.allergies = allergies;
        }
        if let Some(payment_method) = self.payment_method {
            patient.payment_method = payment_method;
        }
        if let Some(medical_aid) = self.medical_aid {
            patient.medical_aid = Some(medical_aid);
        }
        if let Some(status) = self.status {
            patient.status = status;
        }
    }
}
