//! Error taxonomy for the record store and data access service.

use pharmacy_types::RecordId;

/// Errors surfaced by the data access service and record store.
///
/// Validation and referential errors are returned before any state changes,
/// so a failed call leaves the store exactly as it was. Persistence variants
/// carry their underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A required field was missing/blank or a field failed a format check.
    #[error("invalid input: {0}")]
    Validation(String),

    /// An operation referenced an identifier the store does not hold.
    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: RecordId,
    },

    /// A delete was blocked by a referential rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A sync pass was attempted without network connectivity.
    #[error("cannot sync while offline")]
    Offline,

    /// The persistence layer could not be brought up in this environment.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(std::io::Error),

    /// Reading a persisted snapshot from disk failed.
    #[error("failed to read store snapshot: {0}")]
    FileRead(std::io::Error),

    /// Writing a snapshot to disk failed.
    #[error("failed to write store snapshot: {0}")]
    FileWrite(std::io::Error),

    /// Encoding records for persistence failed.
    #[error("failed to serialize records: {0}")]
    Serialization(serde_json::Error),

    /// A persisted snapshot could not be decoded.
    #[error("failed to deserialize records: {0}")]
    Deserialization(serde_json::Error),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
