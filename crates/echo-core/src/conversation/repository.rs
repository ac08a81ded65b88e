//! Conversation repository trait.

use super::record::ConversationArchive;
use crate::error::Result;

/// Persistence for the conversations list.
///
/// Implementations return an empty archive when nothing has been stored yet
/// and a `StorageCorruption` error when stored data cannot be read.
#[async_trait::async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn load(&self) -> Result<ConversationArchive>;

    async fn save(&self, archive: &ConversationArchive) -> Result<()>;
}
