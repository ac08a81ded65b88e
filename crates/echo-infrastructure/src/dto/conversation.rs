//! ConversationArchive DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use echo_core::conversation::{ConversationArchive, ConversationRecord, Message, Sender};

/// Persisted message. `sender` is stored as text; anything other than
/// `"user"` (including the legacy `"ai"`) reads back as the companion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: String,
    pub text: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reactions: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecordDTO {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<MessageDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Conversations list V1.0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ConversationArchiveV1_0_0 {
    #[serde(default)]
    pub conversations: Vec<ConversationRecordDTO>,
}

impl From<MessageDTO> for Message {
    fn from(dto: MessageDTO) -> Self {
        Message {
            id: dto.id,
            text: dto.text,
            sender: if dto.sender == "user" {
                Sender::User
            } else {
                Sender::Companion
            },
            timestamp: dto.timestamp,
            mood: dto.mood,
            tags: dto.tags,
            reactions: dto.reactions,
            personality_id: dto.personality_id,
        }
    }
}

impl From<Message> for MessageDTO {
    fn from(message: Message) -> Self {
        MessageDTO {
            id: message.id,
            text: message.text,
            sender: message.sender.as_str().to_string(),
            timestamp: message.timestamp,
            mood: message.mood,
            tags: message.tags,
            reactions: message.reactions,
            personality_id: message.personality_id,
        }
    }
}

impl IntoDomain<ConversationArchive> for ConversationArchiveV1_0_0 {
    fn into_domain(self) -> ConversationArchive {
        ConversationArchive {
            records: self
                .conversations
                .into_iter()
                .map(|r| ConversationRecord {
                    id: r.id,
                    messages: r.messages.into_iter().map(Into::into).collect(),
                    mood: r.mood,
                    tags: r.tags,
                    summary: r.summary,
                    timestamp: r.timestamp,
                })
                .collect(),
        }
    }
}

impl FromDomain<ConversationArchive> for ConversationArchiveV1_0_0 {
    fn from_domain(archive: ConversationArchive) -> Self {
        ConversationArchiveV1_0_0 {
            conversations: archive
                .records
                .into_iter()
                .map(|r| ConversationRecordDTO {
                    id: r.id,
                    messages: r.messages.into_iter().map(Into::into).collect(),
                    mood: r.mood,
                    tags: r.tags,
                    summary: r.summary,
                    timestamp: r.timestamp,
                })
                .collect(),
        }
    }
}

/// Creates a Migrator for the conversations list.
pub fn create_conversation_archive_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define("conversation_archive")
        .from::<ConversationArchiveV1_0_0>()
        .into_with_save::<ConversationArchive>();
    migrator
        .register(path)
        .expect("Failed to register conversation_archive migration path");
    migrator
}
