//! Mood log and wellness data repositories.
//!
//! File locations: `mood-entries.json` and `wellness-data.json` under the
//! EchoWhisper config directory. Both are versioned JSON documents.

use async_trait::async_trait;
use std::path::PathBuf;
use version_migrate::Migrator;

use echo_core::EchoError;
use echo_core::error::Result;
use echo_core::mood::{MoodLog, MoodRepository, WellnessData, WellnessRepository};

use crate::dto::{create_mood_log_migrator, create_wellness_data_migrator, normalize_legacy};
use crate::paths::EchoPaths;
use crate::storage::AtomicJsonFile;

/// File-based mood log repository with version migration support.
pub struct FileMoodRepository {
    file: AtomicJsonFile,
    migrator: Migrator,
}

impl FileMoodRepository {
    const ENTITY: &'static str = "mood_log";
    /// Unversioned mood arrays already carry sub-scores and tags.
    const LEGACY_VERSION: &'static str = "1.1.0";

    pub fn new(paths: &EchoPaths) -> Self {
        Self::with_path(paths.mood_entries_file())
    }

    /// Creates a repository backed by an explicit file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            migrator: create_mood_log_migrator(),
        }
    }
}

#[async_trait]
impl MoodRepository for FileMoodRepository {
    async fn load(&self) -> Result<MoodLog> {
        let value = match self.file.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(MoodLog::default()),
            Err(e) => return Err(EchoError::storage_corruption("mood entries", e.to_string())),
        };

        let value = normalize_legacy(value, "entries", Self::LEGACY_VERSION);
        self.migrator
            .load_flat_from(Self::ENTITY, value)
            .map_err(|e| EchoError::storage_corruption("mood entries", e.to_string()))
    }

    async fn save(&self, log: &MoodLog) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, log)
            .map_err(|e| EchoError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize mood entries: {}", e),
            })?;

        self.file
            .write_str(&serialized)
            .map_err(|e| EchoError::io(format!("Failed to write mood entries: {}", e)))
    }
}

/// File-based wellness data repository.
pub struct FileWellnessRepository {
    file: AtomicJsonFile,
    migrator: Migrator,
}

impl FileWellnessRepository {
    const ENTITY: &'static str = "wellness_data";

    pub fn new(paths: &EchoPaths) -> Self {
        Self::with_path(paths.wellness_data_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            migrator: create_wellness_data_migrator(),
        }
    }
}

#[async_trait]
impl WellnessRepository for FileWellnessRepository {
    async fn load(&self) -> Result<WellnessData> {
        let value = match self.file.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(WellnessData::default()),
            Err(e) => return Err(EchoError::storage_corruption("wellness data", e.to_string())),
        };

        let value = normalize_legacy(value, "moodEntries", "1.0.0");
        self.migrator
            .load_flat_from(Self::ENTITY, value)
            .map_err(|e| EchoError::storage_corruption("wellness data", e.to_string()))
    }

    async fn save(&self, data: &WellnessData) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, data)
            .map_err(|e| EchoError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize wellness data: {}", e),
            })?;

        self.file
            .write_str(&serialized)
            .map_err(|e| EchoError::io(format!("Failed to write wellness data: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_core::mood::MoodSubmission;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_empty_log() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileMoodRepository::with_path(temp_dir.path().join("mood-entries.json"));
        assert!(repo.load().await.unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileMoodRepository::with_path(temp_dir.path().join("mood-entries.json"));

        let mut submission = MoodSubmission::new(4);
        submission.tags = vec!["Grateful".into()];
        let entry = submission
            .into_entry("2025-06-01T08:00:00Z".parse().unwrap())
            .unwrap();
        let log = MoodLog {
            entries: vec![entry.clone()],
        };

        repo.save(&log).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.entries, vec![entry]);
    }

    #[tokio::test]
    async fn test_invalid_json_is_storage_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wellness-data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileWellnessRepository::with_path(path)
            .load()
            .await
            .unwrap_err();
        assert!(err.is_storage_corruption());
    }
}
