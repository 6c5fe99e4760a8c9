//! Input validation.
//!
//! This module is the only place field-level rules are enforced. Each entity
//! gets a validator for new records and one for patches; patch validators
//! only check the fields the patch actually carries. The service runs these
//! before touching the store, so a validation failure never leaves partial
//! state behind.

use crate::constants::MIN_PHONE_DIGITS;
use crate::error::{DataError, DataResult};
use pharmacy_types::{
    Medication, MedicationPatch, Order, OrderItem, OrderPatch, Patient, PatientPatch,
    PharmacyProfile,
};

/// Checks that a required text field is present and not blank.
///
/// # Errors
///
/// Returns `DataError::Validation` naming the field when `value` is empty or
/// whitespace-only.
pub fn require(field: &'static str, value: &str) -> DataResult<()> {
    if value.trim().is_empty() {
        return Err(DataError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validates an email address against the `local@domain.tld` shape.
///
/// Accepted: exactly one `@`, a non-empty local part, a domain with an
/// interior dot and non-empty parts, no whitespace anywhere.
///
/// # Errors
///
/// Returns `DataError::Validation` when the address does not match.
pub fn validate_email(email: &str) -> DataResult<()> {
    let email = email.trim();

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(DataError::Validation("invalid email format".into()));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(DataError::Validation("invalid email format".into()));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(DataError::Validation("invalid email format".into()));
    }

    // The domain needs at least one interior dot with text on both sides.
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(DataError::Validation("invalid email format".into())),
    }
}

/// Validates a phone number.
///
/// Accepted: an optional leading `+`, then digits, spaces and hyphens, with
/// at least [`MIN_PHONE_DIGITS`] digits in total.
///
/// # Errors
///
/// Returns `DataError::Validation` when another character appears or too few
/// digits are present.
pub fn validate_phone(phone: &str) -> DataResult<()> {
    let trimmed = phone.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = 0usize;
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => {
                return Err(DataError::Validation(
                    "invalid phone number format".into(),
                ))
            }
        }
    }

    if digits < MIN_PHONE_DIGITS {
        return Err(DataError::Validation(format!(
            "phone number must contain at least {MIN_PHONE_DIGITS} digits"
        )));
    }

    Ok(())
}

// ============================================================================
// Patients
// ============================================================================

pub(crate) fn validate_new_patient(patient: &Patient) -> DataResult<()> {
    require("patient name", &patient.name)?;
    require("date of birth", &patient.date_of_birth)?;
    require("phone number", &patient.phone)?;
    require("email", &patient.email)?;
    require("street address", &patient.address.street)?;
    require("city", &patient.address.city)?;
    validate_email(&patient.email)?;
    validate_phone(&patient.phone)
}

/// Re-checks only the contact fields a patch carries.
pub(crate) fn validate_patient_patch(patch: &PatientPatch) -> DataResult<()> {
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(phone) = &patch.phone {
        validate_phone(phone)?;
    }
    Ok(())
}

// ============================================================================
// Orders
// ============================================================================

fn validate_order_items(items: &[OrderItem]) -> DataResult<()> {
    if items.is_empty() {
        return Err(DataError::Validation(
            "an order needs at least one item".into(),
        ));
    }

    for item in items {
        require("item medication name", &item.medication)?;
        if item.quantity == 0 {
            return Err(DataError::Validation(
                "item quantity must be at least 1".into(),
            ));
        }
        if item.price < 0.0 {
            return Err(DataError::Validation(
                "item price cannot be negative".into(),
            ));
        }
    }

    Ok(())
}

pub(crate) fn validate_new_order(order: &Order) -> DataResult<()> {
    require("patient name", &order.patient_name)?;
    require("order date", &order.order_date)?;
    validate_order_items(&order.items)?;
    if order.total_amount < 0.0 {
        return Err(DataError::Validation(
            "order total cannot be negative".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_order_patch(patch: &OrderPatch) -> DataResult<()> {
    if let Some(patient_name) = &patch.patient_name {
        require("patient name", patient_name)?;
    }
    if let Some(items) = &patch.items {
        validate_order_items(items)?;
    }
    if let Some(total_amount) = patch.total_amount {
        if total_amount < 0.0 {
            return Err(DataError::Validation(
                "order total cannot be negative".into(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Medications
// ============================================================================

pub(crate) fn validate_new_medication(medication: &Medication) -> DataResult<()> {
    require("medication name", &medication.name)?;
    require("category", &medication.category)?;
    require("supplier", &medication.supplier)?;
    require("batch number", &medication.batch_number)?;
    if medication.price < 0.0 {
        return Err(DataError::Validation("price cannot be negative".into()));
    }
    Ok(())
}

pub(crate) fn validate_medication_patch(patch: &MedicationPatch) -> DataResult<()> {
    if let Some(name) = &patch.name {
        require("medication name", name)?;
    }
    if let Some(category) = &patch.category {
        require("category", category)?;
    }
    if let Some(supplier) = &patch.supplier {
        require("supplier", supplier)?;
    }
    if let Some(batch_number) = &patch.batch_number {
        require("batch number", batch_number)?;
    }
    if let Some(price) = patch.price {
        if price < 0.0 {
            return Err(DataError::Validation("price cannot be negative".into()));
        }
    }
    Ok(())
}

// ============================================================================
// Profile
// ============================================================================

pub(crate) fn validate_profile(profile: &PharmacyProfile) -> DataResult<()> {
    require("pharmacy name", &profile.pharmacy_name)?;
    validate_email(&profile.email)?;
    validate_phone(&profile.phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("name", "").is_err());
        assert!(require("name", "   ").is_err());
        assert!(require("name", "Jane").is_ok());
    }

    #[test]
    fn accepts_plain_email_addresses() {
        for email in ["jane@example.com", "a@b.co", "first.last@sub.domain.org"] {
            validate_email(email).expect("valid email");
        }
    }

    #[test]
    fn rejects_malformed_email_addresses() {
        for email in [
            "",
            "plainaddress",
            "no-domain@",
            "@no-local.com",
            "missing-dot@domain",
            "trailing-dot@domain.",
            "dot-first@.com",
            "two@@example.com",
            "spaced out@example.com",
        ] {
            assert!(
                validate_email(email).is_err(),
                "expected rejection for {email:?}"
            );
        }
    }

    #[test]
    fn counts_digits_ignoring_separators() {
        validate_phone("+1 555-123-4567").expect("valid phone");
        validate_phone("0115550100").expect("valid phone");
        validate_phone("011 555 0100").expect("valid phone");
    }

    #[test]
    fn rejects_short_or_malformed_phones() {
        // Nine digits, even though the string itself is longer.
        assert!(validate_phone("+1 555-123-456").is_err());
        assert!(validate_phone("555-0123").is_err());
        assert!(validate_phone("555x123x4567x9").is_err());
        // '+' is only allowed in the leading position.
        assert!(validate_phone("555+123+4567+8").is_err());
    }

    #[test]
    fn order_items_must_carry_quantity_and_name() {
        let mut item = OrderItem::new("Ibuprofen 200mg", 1, 30.0, "", "");
        validate_order_items(std::slice::from_ref(&item)).expect("valid item");

        item.quantity = 0;
        assert!(validate_order_items(std::slice::from_ref(&item)).is_err());

        item.quantity = 1;
        item.medication = String::new();
        assert!(validate_order_items(std::slice::from_ref(&item)).is_err());

        assert!(validate_order_items(&[]).is_err());
    }
}
