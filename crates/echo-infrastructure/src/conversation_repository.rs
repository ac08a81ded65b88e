//! Conversation archive repository.
//!
//! File location: `conversations.json` under the EchoWhisper config directory.

use async_trait::async_trait;
use std::path::PathBuf;
use version_migrate::Migrator;

use echo_core::EchoError;
use echo_core::conversation::{ConversationArchive, ConversationRepository};
use echo_core::error::Result;

use crate::dto::{create_conversation_archive_migrator, normalize_legacy};
use crate::paths::EchoPaths;
use crate::storage::AtomicJsonFile;

/// File-based conversation archive with version migration support.
pub struct FileConversationRepository {
    file: AtomicJsonFile,
    migrator: Migrator,
}

impl FileConversationRepository {
    const ENTITY: &'static str = "conversation_archive";

    pub fn new(paths: &EchoPaths) -> Self {
        Self::with_path(paths.conversations_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            migrator: create_conversation_archive_migrator(),
        }
    }
}

#[async_trait]
impl ConversationRepository for FileConversationRepository {
    async fn load(&self) -> Result<ConversationArchive> {
        let value = match self.file.read_value() {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(ConversationArchive::default()),
            Err(e) => return Err(EchoError::storage_corruption("conversations", e.to_string())),
        };

        let value = normalize_legacy(value, "conversations", "1.0.0");
        self.migrator
            .load_flat_from(Self::ENTITY, value)
            .map_err(|e| EchoError::storage_corruption("conversations", e.to_string()))
    }

    async fn save(&self, archive: &ConversationArchive) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, archive)
            .map_err(|e| EchoError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize conversations: {}", e),
            })?;

        tracing::debug!(
            "[ConversationRepository] Saving {} conversations",
            archive.len()
        );
        self.file
            .write_str(&serialized)
            .map_err(|e| EchoError::io(format!("Failed to write conversations: {}", e)))
    }
}
