//! The active conversation session.

use super::message::Message;
use super::record::ConversationRecord;
use crate::error::{EchoError, Result};
use crate::persona::{PersonalityProfile, Trait, TraitVector, transition_message};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An ordered message log bound to one active profile and trait vector.
///
/// Switching profile resets the trait vector and appends a transition
/// message; the log itself is kept as history.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: String,
    profile_id: String,
    traits: TraitVector,
    messages: Vec<Message>,
    started_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Starts a session whose first message is the profile's greeting.
    pub fn new(profile: &PersonalityProfile, now: DateTime<Utc>) -> Self {
        let greeting = Message::companion(profile.greeting.clone(), profile.id.clone(), now);
        Self {
            id: Uuid::new_v4().to_string(),
            profile_id: profile.id.clone(),
            traits: profile.traits,
            messages: vec![greeting],
            started_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn traits(&self) -> &TraitVector {
        &self.traits
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops messages past `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    /// Sets one trait of the session's vector. Returns the clamped value.
    pub fn set_trait(&mut self, t: Trait, value: i32) -> u8 {
        self.traits.set(t, value)
    }

    pub fn adjust_trait(&mut self, t: Trait, delta: i32) -> u8 {
        self.traits.adjust(t, delta)
    }

    /// Binds the session to another profile.
    ///
    /// Resets the trait vector to the profile's base vector and appends the
    /// transition message, which is returned.
    pub fn switch_profile(&mut self, profile: &PersonalityProfile, now: DateTime<Utc>) -> &Message {
        self.profile_id = profile.id.clone();
        self.traits = profile.traits;
        self.messages.push(Message::companion(
            transition_message(profile),
            profile.id.clone(),
            now,
        ));
        tracing::info!("[ConversationSession] Switched profile to {}", profile.id);
        &self.messages[self.messages.len() - 1]
    }

    /// Increments a reaction on one message.
    pub fn react(&mut self, message_id: &str, reaction: &str) -> Result<u32> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| EchoError::not_found("message", message_id))?;
        message.react(reaction)
    }

    /// Case-insensitive substring search. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Message> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.messages.iter().collect();
        }
        self.messages
            .iter()
            .filter(|m| m.text.to_lowercase().contains(&needle))
            .collect()
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Plain-text transcript, one block per message.
    pub fn export_transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| {
                format!(
                    "[{}] {}: {}",
                    m.timestamp.format("%H:%M:%S"),
                    m.sender.as_str().to_uppercase(),
                    m.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Snapshot for the persisted conversations list.
    pub fn to_record(&self, summary: Option<String>) -> ConversationRecord {
        let mood = self.messages.iter().rev().find_map(|m| m.mood);
        let mut tags: Vec<String> = Vec::new();
        for tag in self.messages.iter().flat_map(|m| m.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        let timestamp = self
            .messages
            .last()
            .map(|m| m.timestamp)
            .unwrap_or(self.started_at);

        ConversationRecord {
            id: self.id.clone(),
            messages: self.messages.clone(),
            mood,
            tags,
            summary,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Sender;
    use crate::persona::PersonalityCatalog;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 4, 14, 30, 0).unwrap()
    }

    fn session() -> ConversationSession {
        let catalog = PersonalityCatalog::default();
        ConversationSession::new(catalog.select("sarah").unwrap(), start())
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = session();
        assert_eq!(session.len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Companion);
        assert!(session.messages()[0].text.starts_with("Hello dear!"));
        assert_eq!(session.traits().get(Trait::Empathy), 95);
    }

    #[test]
    fn test_switch_resets_traits_and_appends_transition() {
        let catalog = PersonalityCatalog::default();
        let mut session = session();
        session.set_trait(Trait::Empathy, 20);

        let alex = catalog.select("alex").unwrap();
        let transition = session.switch_profile(alex, start()).clone();

        assert_eq!(session.traits().get(Trait::Empathy), 70);
        assert_eq!(session.profile_id(), "alex");
        assert!(transition.text.starts_with("I'm now Energetic Alex!"));
        assert!(transition.text.contains(&alex.greeting));
        assert_eq!(transition.personality_id.as_deref(), Some("alex"));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_react_unknown_message_is_not_found() {
        let mut session = session();
        assert!(session.react("missing", "heart").unwrap_err().is_not_found());

        let id = session.messages()[0].id.clone();
        assert_eq!(session.react(&id, "heart").unwrap(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut session = session();
        session.push(Message::user("I slept BADLY last night", start()));
        session.push(Message::user("Work was fine", start()));

        assert_eq!(session.search("badly").len(), 1);
        assert_eq!(session.search("").len(), 3);
        assert!(session.search("nothing like this").is_empty());
    }

    #[test]
    fn test_recent_is_oldest_first() {
        let mut session = session();
        for i in 0..6 {
            session.push(Message::user(format!("m{}", i), start()));
        }
        let texts: Vec<&str> = session.recent(3).iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m4", "m5"]);
        assert_eq!(session.recent(100).len(), 7);
    }

    #[test]
    fn test_export_transcript_format() {
        let mut session = session();
        session.push(Message::user("hello", start() + Duration::seconds(5)));

        let transcript = session.export_transcript();
        let blocks: Vec<&str> = transcript.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("[14:30:00] COMPANION: Hello dear!"));
        assert_eq!(blocks[1], "[14:30:05] USER: hello");
    }

    #[test]
    fn test_to_record_collects_mood_and_tags() {
        let mut session = session();
        session.push(Message::user("rough day", start()));
        session.push(
            Message::companion("I hear you", "sarah", start())
                .with_mood(2)
                .with_tags(vec!["stress".into()]),
        );

        let record = session.to_record(None);
        assert_eq!(record.id, session.id());
        assert_eq!(record.mood, Some(2));
        assert_eq!(record.tags, vec!["stress".to_string()]);
        assert_eq!(record.messages.len(), 3);
    }
}
