//! Inventory medication records.
//!
//! Stock status is operator-set from the inventory screen, never derived
//! from the quantity on hand. Medications carry a `lastModified` stamp but
//! no sync status: the simulated sync pass covers patients and orders only.

use crate::id::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operator-set stock level bucket.
///
/// Serialises as the display strings the inventory screen shows
/// (`"In Stock"`, `"Low Stock"`, `"Out of Stock"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[default]
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// Display/wire string for this bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory line as held in the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    #[serde(default)]
    pub status: StockStatus,
    pub price: f64,
    pub supplier: String,
    pub expiry_date: String,
    pub batch_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Field-wise partial update for a medication record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
}

impl MedicationPatch {
    /// Merges the set fields of this patch into `medication`.
    pub fn apply(self, medication: &mut Medication) {
        if let Some(name) = self.name {
            medication.name = name;
        }
        if let Some(quantity) = self.quantity {
            medication.quantity = quantity;
        }
        if let Some(category) = self.category {
            medication.category = category;
        }
        if let Some(status) = self.status {
            medication.status = status;
        }
        if let Some(price) = self.price {
            medication.price = price;
        }
        if let Some(supplier) = self.supplier {
            medication.supplier = supplier;
        }
        if let Some(expiry_date) = self.expiry_date {
            medication.expiry_date = expiry_date;
        }
        if let Some(batch_number) = self.batch_number {
            medication.batch_number = batch_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_status_uses_display_strings_on_the_wire() {
        let json = serde_json::to_string(&StockStatus::LowStock).expect("serialise status");
        assert_eq!(json, "\"Low Stock\"");

        let back: StockStatus = serde_json::from_str("\"Out of Stock\"").expect("deserialise");
        assert_eq!(back, StockStatus::OutOfStock);
    }

    #[test]
    fn round_trips_an_inventory_line() {
        let medication = Medication {
            id: None,
            name: "Paracetamol 500mg".to_string(),
            quantity: 120,
            category: "Analgesic".to_string(),
            status: StockStatus::InStock,
            price: 25.5,
            supplier: "Acme Pharma".to_string(),
            expiry_date: "2027-03-31".to_string(),
            batch_number: "B-2093".to_string(),
            last_modified: None,
        };

        let json = serde_json::to_value(&medication).expect("serialise medication");
        assert_eq!(json["batchNumber"], "B-2093");
        assert_eq!(json["status"], "In Stock");

        let back: Medication = serde_json::from_value(json).expect("deserialise medication");
        assert_eq!(back, medication);
    }
}
