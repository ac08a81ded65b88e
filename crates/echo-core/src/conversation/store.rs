//! Conversation store.

use super::message::Message;
use super::record::{ConversationArchive, ConversationContext};
use super::repository::ConversationRepository;
use super::session::ConversationSession;
use crate::error::Result;
use std::sync::Arc;

/// Append-only, bounded conversation log backed by a repository.
///
/// Every append upserts the active session at index 0 of the persisted list
/// and writes the whole bounded list back.
pub struct ConversationStore {
    repository: Arc<dyn ConversationRepository>,
    archive: ConversationArchive,
}

impl ConversationStore {
    /// Loads the persisted list. Unreadable data resets the list to empty.
    pub async fn load(repository: Arc<dyn ConversationRepository>) -> Self {
        let mut archive = match repository.load().await {
            Ok(archive) => archive,
            Err(e) => {
                tracing::warn!(
                    "[ConversationStore] Resetting unreadable conversations list: {}",
                    e
                );
                ConversationArchive::default()
            }
        };
        let dropped = archive.enforce_bounds();
        if dropped > 0 {
            tracing::warn!("[ConversationStore] Dropped {} conversations over the cap", dropped);
        }
        Self {
            repository,
            archive,
        }
    }

    pub fn archive(&self) -> &ConversationArchive {
        &self.archive
    }

    /// Appends `message` to the session and persists the bounded list.
    pub async fn append(&mut self, session: &mut ConversationSession, message: Message) -> Result<()> {
        self.append_all(session, vec![message]).await
    }

    /// Appends a user message and its reply with a single save.
    ///
    /// On a failed save neither message stays in the session.
    pub async fn append_turn(
        &mut self,
        session: &mut ConversationSession,
        user_message: Message,
        reply: Message,
    ) -> Result<()> {
        self.append_all(session, vec![user_message, reply]).await
    }

    async fn append_all(
        &mut self,
        session: &mut ConversationSession,
        messages: Vec<Message>,
    ) -> Result<()> {
        let len = session.len();
        for message in messages {
            session.push(message);
        }
        if let Err(e) = self.persist(session, None).await {
            session.truncate(len);
            return Err(e);
        }
        Ok(())
    }

    /// Upserts the session's current state, optionally with a summary.
    ///
    /// The in-memory list is left unchanged when the save fails.
    pub async fn persist(
        &mut self,
        session: &ConversationSession,
        summary: Option<String>,
    ) -> Result<()> {
        let summary = summary.or_else(|| {
            self.archive
                .get(session.id())
                .and_then(|r| r.summary.clone())
        });
        let mut archive = self.archive.clone();
        archive.upsert(session.to_record(summary));
        self.repository.save(&archive).await?;
        self.archive = archive;
        Ok(())
    }

    pub fn context(&self, last_mood: Option<u8>) -> ConversationContext {
        ConversationContext::build(&self.archive, last_mood)
    }
}
