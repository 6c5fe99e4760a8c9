//! Core runtime configuration.
//!
//! Configuration is resolved once by the embedding application and passed
//! into the record store and service by value. Nothing in this crate reads
//! environment variables or other ambient state during operation; tests and
//! the running console differ only in the `CoreConfig` they construct.

use crate::constants::DEFAULT_SYNC_DELAY_MS;
use crate::error::{DataError, DataResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which backing the record store uses.
///
/// Callers never branch on the active mode; both are served through the
/// same table interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreMode {
    /// Records live only in process memory. Used by tests.
    InMemory,
    /// Records are snapshotted as JSON files under the given directory.
    OnDisk(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_mode: StoreMode,
    sync_delay: Duration,
}

impl CoreConfig {
    /// Configuration for a memory-only store.
    pub fn in_memory() -> Self {
        Self {
            store_mode: StoreMode::InMemory,
            sync_delay: Duration::from_millis(DEFAULT_SYNC_DELAY_MS),
        }
    }

    /// Configuration for a store persisted under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Validation` if `data_dir` is empty.
    pub fn on_disk(data_dir: impl Into<PathBuf>) -> DataResult<Self> {
        let data_dir = data_dir.into();
        if data_dir.as_os_str().is_empty() {
            return Err(DataError::Validation(
                "data directory cannot be empty".into(),
            ));
        }

        Ok(Self {
            store_mode: StoreMode::OnDisk(data_dir),
            sync_delay: Duration::from_millis(DEFAULT_SYNC_DELAY_MS),
        })
    }

    /// Overrides the per-record delay of the simulated sync transport.
    ///
    /// Tests set this to zero so sync passes complete immediately.
    pub fn with_sync_delay(mut self, delay: Duration) -> Self {
        self.sync_delay = delay;
        self
    }

    pub fn store_mode(&self) -> &StoreMode {
        &self.store_mode
    }

    /// Directory snapshots are written to, when persisted.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.store_mode {
            StoreMode::InMemory => None,
            StoreMode::OnDisk(dir) => Some(dir),
        }
    }

    pub fn sync_delay(&self) -> Duration {
        self.sync_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_data_dir() {
        let err = CoreConfig::on_disk("").expect_err("empty dir must be rejected");
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn in_memory_has_no_data_dir() {
        let config = CoreConfig::in_memory();
        assert_eq!(config.store_mode(), &StoreMode::InMemory);
        assert!(config.data_dir().is_none());
    }

    #[test]
    fn sync_delay_can_be_overridden() {
        let config = CoreConfig::in_memory().with_sync_delay(Duration::ZERO);
        assert_eq!(config.sync_delay(), Duration::ZERO);
    }
}
