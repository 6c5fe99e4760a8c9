//! Pharmacy profile.
//!
//! A singleton record with the pharmacy's own contact details, shown on the
//! settings screen. It is stored beside the keyed tables and has no sync
//! status or identifier.

use serde::{Deserialize, Serialize};

/// The pharmacy's own details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyProfile {
    pub pharmacy_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for PharmacyProfile {
    /// Placeholder details shown until the operator fills in their own.
    fn default() -> Self {
        Self {
            pharmacy_name: "My Pharmacy".to_string(),
            address: "123 Main St".to_string(),
            phone: "555-0123".to_string(),
            email: "contact@mypharmacy.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_has_placeholder_details() {
        let profile = PharmacyProfile::default();
        assert_eq!(profile.pharmacy_name, "My Pharmacy");
        assert_eq!(profile.email, "contact@mypharmacy.com");
    }

    #[test]
    fn serialises_with_camel_case_wire_names() {
        let json = serde_json::to_value(PharmacyProfile::default()).expect("serialise profile");
        assert_eq!(json["pharmacyName"], "My Pharmacy");
    }
}
