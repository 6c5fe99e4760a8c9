//! Singleton storage for the pharmacy profile.

use crate::config::StoreMode;
use crate::constants::PROFILE_FILENAME;
use crate::error::{DataError, DataResult};
use pharmacy_types::PharmacyProfile;
use std::fs;
use std::path::PathBuf;

/// Holds the one profile record, with the same snapshot discipline as the
/// keyed tables. A missing file yields the placeholder default.
pub(crate) struct ProfileSlot {
    profile: PharmacyProfile,
    file: Option<PathBuf>,
}

impl ProfileSlot {
    pub(crate) fn open(mode: &StoreMode) -> DataResult<Self> {
        let file = match mode {
            StoreMode::InMemory => None,
            StoreMode::OnDisk(dir) => Some(dir.join(PROFILE_FILENAME)),
        };

        let profile = match &file {
            Some(path) if path.is_file() => {
                let contents = fs::read_to_string(path).map_err(DataError::FileRead)?;
                serde_json::from_str(&contents).map_err(DataError::Deserialization)?
            }
            _ => PharmacyProfile::default(),
        };

        Ok(Self { profile, file })
    }

    pub(crate) fn get(&self) -> &PharmacyProfile {
        &self.profile
    }

    pub(crate) fn set(&mut self, profile: PharmacyProfile) -> DataResult<()> {
        if let Some(path) = &self.file {
            let json = serde_json::to_string_pretty(&profile).map_err(DataError::Serialization)?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, json).map_err(DataError::FileWrite)?;
            fs::rename(&tmp, path).map_err(DataError::FileWrite)?;
        }
        self.profile = profile;
        Ok(())
    }
}
