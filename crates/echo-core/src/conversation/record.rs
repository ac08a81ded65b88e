//! Persisted conversation records and summaries.

use super::message::Message;
use crate::bounded::prepend_bounded;
use crate::validation::is_valid_score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cap on the persisted conversations list.
pub const MAX_CONVERSATIONS: usize = 50;

/// One conversation as stored in the conversations list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A closed, substantial conversation condensed for the wellness aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub summary: String,
    /// Mood snapshot, 1-5
    pub mood: u8,
    pub insights: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// The persisted conversations list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationArchive {
    pub records: Vec<ConversationRecord>,
}

impl ConversationArchive {
    /// Moves `record` to index 0, replacing any record with the same id.
    pub fn upsert(&mut self, record: ConversationRecord) {
        self.records.retain(|r| r.id != record.id);
        prepend_bounded(&mut self.records, record, MAX_CONVERSATIONS);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ConversationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Truncates to the cap and clears mood values outside 1-5.
    /// Returns the number of records removed.
    pub fn enforce_bounds(&mut self) -> usize {
        let before = self.records.len();
        self.records.truncate(MAX_CONVERSATIONS);
        for record in &mut self.records {
            record.mood = record.mood.filter(|m| is_valid_score(*m));
            for message in &mut record.messages {
                message.mood = message.mood.filter(|m| is_valid_score(*m));
            }
        }
        before - self.records.len()
    }
}

/// Context view assembled from history and the mood log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Mood of the newest mood entry
    pub last_mood: Option<u8>,
    pub conversation_count: usize,
    /// Summaries of the three newest conversations that have one
    pub recent_summaries: Vec<String>,
}

impl ConversationContext {
    pub fn build(archive: &ConversationArchive, last_mood: Option<u8>) -> Self {
        Self {
            last_mood,
            conversation_count: archive.len(),
            recent_summaries: archive
                .records
                .iter()
                .take(3)
                .filter_map(|r| r.summary.clone())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, summary: Option<&str>) -> ConversationRecord {
        ConversationRecord {
            id: id.to_string(),
            messages: Vec::new(),
            mood: None,
            tags: Vec::new(),
            summary: summary.map(str::to_string),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_moves_existing_to_front() {
        let mut archive = ConversationArchive::default();
        archive.upsert(record("a", None));
        archive.upsert(record("b", None));
        archive.upsert(record("a", Some("updated")));

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.records[0].id, "a");
        assert_eq!(archive.records[0].summary.as_deref(), Some("updated"));
    }

    #[test]
    fn test_archive_never_exceeds_cap() {
        let mut archive = ConversationArchive::default();
        for i in 0..(MAX_CONVERSATIONS + 20) {
            archive.upsert(record(&i.to_string(), None));
        }
        assert_eq!(archive.len(), MAX_CONVERSATIONS);
        assert_eq!(archive.records[0].id, (MAX_CONVERSATIONS + 19).to_string());
    }

    #[test]
    fn test_context_takes_first_three_with_summary() {
        let mut archive = ConversationArchive::default();
        archive.upsert(record("old", Some("oldest")));
        archive.upsert(record("mid", None));
        archive.upsert(record("new", Some("newest")));
        archive.upsert(record("newer", Some("")));

        let context = ConversationContext::build(&archive, Some(4));
        assert_eq!(context.conversation_count, 4);
        assert_eq!(context.last_mood, Some(4));
        assert_eq!(context.recent_summaries, vec!["newest".to_string()]);
    }

    #[test]
    fn test_enforce_bounds_on_loaded_archive() {
        let mut archive = ConversationArchive {
            records: (0..70).map(|i| record(&i.to_string(), None)).collect(),
        };
        archive.records[0].mood = Some(9);
        archive.records[1].mood = Some(2);

        assert_eq!(archive.enforce_bounds(), 20);
        assert_eq!(archive.len(), MAX_CONVERSATIONS);
        assert_eq!(archive.records[0].mood, None);
        assert_eq!(archive.records[1].mood, Some(2));
    }
}
