//! Order records.
//!
//! An order belongs to exactly one patient (`patient_id`), carries the
//! patient's name denormalised for display and prefix search, and lists the
//! dispensed items with their dosage instructions. Line items get a UUID at
//! construction time; the order itself is keyed by a store-assigned
//! `RecordId` like every other record.

use crate::id::RecordId;
use crate::patient::PaymentMethod;
use crate::sync::SyncStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Settlement state of an order's payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// Fulfilment state of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Wire-format string, as persisted in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A single dispensed line on an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub medication: String,
    pub quantity: u32,
    pub price: f64,
    pub dosage: String,
    pub instructions: String,
}

impl OrderItem {
    /// Creates a line item with a fresh identifier.
    pub fn new(
        medication: impl Into<String>,
        quantity: u32,
        price: f64,
        dosage: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            medication: medication.into(),
            quantity,
            price,
            dosage: dosage.into(),
            instructions: instructions.into(),
        }
    }

    /// Line total (`quantity * price`).
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// An order record as held in the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub patient_id: RecordId,
    pub patient_name: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub order_status: OrderStatus,
    pub order_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub sync_status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Field-wise partial update for an order record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderPatch {
    /// Merges the set fields of this patch into `order`.
    pub fn apply(self, order: &mut Order) {
        if let Some(patient_id) = self.patient_id {
            order.patient_id = patient_id;
        }
        if let Some(patient_name) = self.patient_name {
            order.patient_name = patient_name;
        }
        if let Some(items) = self.items {
            order.items = items;
        }
        if let Some(total_amount) = self.total_amount {
            order.total_amount = total_amount;
        }
        if let Some(payment_method) = self.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(payment_status) = self.payment_status {
            order.payment_status = payment_status;
        }
        if let Some(order_status) = self.order_status {
            order.order_status = order_status;
        }
        if let Some(order_date) = self.order_date {
            order.order_date = order_date;
        }
        if let Some(delivery_date) = self.delivery_date {
            order.delivery_date = Some(delivery_date);
        }
        if let Some(notes) = self.notes {
            order.notes = Some(notes);
        }
    }
}
