//! Conversation message model.

use crate::error::{EchoError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Reaction names a user may attach to a message.
pub const REACTIONS: [&str; 6] = ["thumbs_up", "heart", "smile", "hug", "lightbulb", "pray"];

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Companion,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Companion => "companion",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single exchanged message.
///
/// Immutable once created apart from its reaction counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Detected mood, 1-5
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reactions: BTreeMap<String, u32>,
    /// Profile that authored a companion message
    #[serde(default)]
    pub personality_id: Option<String>,
}

impl Message {
    fn new(text: impl Into<String>, sender: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp,
            mood: None,
            tags: Vec::new(),
            reactions: BTreeMap::new(),
            personality_id: None,
        }
    }

    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(text, Sender::User, timestamp)
    }

    pub fn companion(
        text: impl Into<String>,
        personality_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut message = Self::new(text, Sender::Companion, timestamp);
        message.personality_id = Some(personality_id.into());
        message
    }

    pub fn with_mood(mut self, mood: u8) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Increments a named reaction counter and returns the new count.
    pub fn react(&mut self, reaction: &str) -> Result<u32> {
        if !REACTIONS.contains(&reaction) {
            return Err(EchoError::validation(format!(
                "Unknown reaction '{}'",
                reaction
            )));
        }
        let count = self.reactions.entry(reaction.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_counts_per_name() {
        let mut message = Message::user("hi", Utc::now());
        assert_eq!(message.react("heart").unwrap(), 1);
        assert_eq!(message.react("heart").unwrap(), 2);
        assert_eq!(message.react("hug").unwrap(), 1);
        assert_eq!(message.reactions.len(), 2);
    }

    #[test]
    fn test_unknown_reaction_is_rejected() {
        let mut message = Message::user("hi", Utc::now());
        assert!(message.react("angry").unwrap_err().is_validation());
        assert!(message.reactions.is_empty());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Companion).unwrap();
        assert_eq!(json, "\"companion\"");
    }
}
