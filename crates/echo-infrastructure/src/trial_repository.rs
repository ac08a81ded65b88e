//! Pro trial state repository.
//!
//! File location: `echowhisper-pro-trial.json` under the EchoWhisper config directory.

use async_trait::async_trait;
use std::path::PathBuf;
use version_migrate::Migrator;

use echo_core::EchoError;
use echo_core::entitlement::{TrialRepository, TrialState};
use echo_core::error::Result;

use crate::dto::{create_trial_state_migrator, normalize_legacy};
use crate::paths::EchoPaths;
use crate::storage::AtomicJsonFile;

pub struct FileTrialRepository {
    file: AtomicJsonFile,
    migrator: Migrator,
}

impl FileTrialRepository {
    const ENTITY: &'static str = "trial_state";

    pub fn new(paths: &EchoPaths) -> Self {
        Self::with_path(paths.trial_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            migrator: create_trial_state_migrator(),
        }
    }
}

#[async_trait]
impl TrialRepository for FileTrialRepository {
    async fn load(&self) -> Result<TrialState> {
        let value = match self.file.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(TrialState::default()),
            Err(e) => return Err(EchoError::storage_corruption("trial state", e.to_string())),
        };

        // The trial document was always an object; the array field is unused.
        let value = normalize_legacy(value, "state", "1.0.0");
        self.migrator
            .load_flat_from(Self::ENTITY, value)
            .map_err(|e| EchoError::storage_corruption("trial state", e.to_string()))
    }

    async fn save(&self, state: &TrialState) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, state)
            .map_err(|e| EchoError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize trial state: {}", e),
            })?;

        self.file
            .write_str(&serialized)
            .map_err(|e| EchoError::io(format!("Failed to write trial state: {}", e)))
    }
}
