//! Mood entry model.

use crate::error::Result;
use crate::validation::{is_valid_score, validate_score};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cap on the raw mood-entries list.
pub const MAX_MOOD_ENTRIES: usize = 30;

/// Tags offered by the mood check-in form.
pub const COMMON_TAGS: [&str; 12] = [
    "work",
    "family",
    "health",
    "social",
    "exercise",
    "sleep",
    "stress",
    "anxiety",
    "grateful",
    "productive",
    "tired",
    "energetic",
];

const DEFAULT_SUB_SCORE: u8 = 3;

/// A user-submitted mood check-in. Scores are 1-5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood: u8,
    pub energy: u8,
    pub anxiety: u8,
    pub sleep: u8,
    pub note: String,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn has_valid_scores(&self) -> bool {
        [self.mood, self.energy, self.anxiety, self.sleep]
            .into_iter()
            .all(is_valid_score)
    }
}

/// Form input for a mood check-in; absent sub-scores default to 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodSubmission {
    pub mood: u8,
    pub energy: Option<u8>,
    pub anxiety: Option<u8>,
    pub sleep: Option<u8>,
    pub note: Option<String>,
    pub tags: Vec<String>,
}

impl MoodSubmission {
    pub fn new(mood: u8) -> Self {
        Self {
            mood,
            ..Default::default()
        }
    }

    /// Validates every score and builds the entry.
    pub fn into_entry(self, timestamp: DateTime<Utc>) -> Result<MoodEntry> {
        let mood = self.mood;
        let energy = self.energy.unwrap_or(DEFAULT_SUB_SCORE);
        let anxiety = self.anxiety.unwrap_or(DEFAULT_SUB_SCORE);
        let sleep = self.sleep.unwrap_or(DEFAULT_SUB_SCORE);
        validate_score("mood", mood)?;
        validate_score("energy", energy)?;
        validate_score("anxiety", anxiety)?;
        validate_score("sleep", sleep)?;

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(MoodEntry {
            id: Uuid::new_v4().to_string(),
            mood,
            energy,
            anxiety,
            sleep,
            note: self.note.unwrap_or_default().trim().to_string(),
            tags,
            timestamp,
        })
    }
}

/// The raw mood-entries list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodLog {
    pub entries: Vec<MoodEntry>,
}

impl MoodLog {
    /// Drops entries with out-of-range scores and truncates to the cap.
    /// Returns the number of entries removed.
    pub fn enforce_bounds(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(MoodEntry::has_valid_scores);
        self.entries.truncate(MAX_MOOD_ENTRIES);
        before - self.entries.len()
    }
}

/// Qualitative label for a (possibly averaged) mood value.
pub fn mood_label(mood: f64) -> &'static str {
    if mood >= 4.5 {
        "Excellent"
    } else if mood >= 3.5 {
        "Good"
    } else if mood >= 2.5 {
        "Neutral"
    } else if mood >= 1.5 {
        "Low"
    } else {
        "Very Low"
    }
}
