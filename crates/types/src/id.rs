//! Record identifiers.
//!
//! Every stored record is keyed by a `RecordId`: a positive integer assigned
//! by the record store when the row is first inserted. Callers never choose
//! identifiers themselves; they receive one back from `add` and use it for
//! lookups, updates and cross-entity references (an order's `patientId`).

/// Errors that can occur when constructing a record identifier.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Zero is reserved; the first assigned identifier is 1.
    #[error("record identifiers must be positive")]
    Zero,
}

/// A positive, store-assigned record identifier.
///
/// Identifiers are unique within one table and increase monotonically with
/// insertion order. They are never reused after a delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a `RecordId` from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Zero` if `raw` is zero.
    pub fn new(raw: u64) -> Result<Self, IdError> {
        if raw == 0 {
            return Err(IdError::Zero);
        }
        Ok(Self(raw))
    }

    /// The first identifier a fresh table assigns.
    pub fn first() -> Self {
        Self(1)
    }

    /// The identifier that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        RecordId::new(raw).map_err(serde::de::Error::custom)
    }
}
