//! Constants used throughout the pharmacy core crate.

/// Default directory for store snapshots when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "pharmacy_data";

/// Version stamped into every persisted table snapshot. Snapshots written
/// under a different version are discarded at open.
pub const SCHEMA_VERSION: u32 = 1;

/// Table name for patient records.
pub const PATIENTS_TABLE: &str = "patients";

/// Table name for order records.
pub const ORDERS_TABLE: &str = "orders";

/// Table name for medication records.
pub const MEDICATIONS_TABLE: &str = "medications";

/// Filename for the singleton pharmacy profile.
pub const PROFILE_FILENAME: &str = "profile.json";

/// Minimum number of digits a phone number must contain, separators excluded.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Per-record delay of the simulated sync transport, in milliseconds.
pub const DEFAULT_SYNC_DELAY_MS: u64 = 1000;
