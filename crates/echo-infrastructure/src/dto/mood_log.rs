//! MoodLog DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use echo_core::mood::{MoodEntry, MoodLog};

fn default_sub_score() -> u8 {
    3
}

// ============================================================================
// V1.0.0
// ============================================================================

/// Mood entry V1.0.0 (no sub-scores, no tags).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryV1_0_0 {
    pub id: String,
    pub mood: u8,
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct MoodLogV1_0_0 {
    #[serde(default)]
    pub entries: Vec<MoodEntryV1_0_0>,
}

// ============================================================================
// V1.1.0
// ============================================================================

/// Mood entry V1.1.0 (added sub-scores and tags).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryV1_1_0 {
    pub id: String,
    pub mood: u8,
    #[serde(default = "default_sub_score")]
    pub energy: u8,
    #[serde(default = "default_sub_score")]
    pub anxiety: u8,
    #[serde(default = "default_sub_score")]
    pub sleep: u8,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct MoodLogV1_1_0 {
    #[serde(default)]
    pub entries: Vec<MoodEntryV1_1_0>,
}

// ============================================================================
// Migration implementations
// ============================================================================

impl MigratesTo<MoodLogV1_1_0> for MoodLogV1_0_0 {
    fn migrate(self) -> MoodLogV1_1_0 {
        MoodLogV1_1_0 {
            entries: self
                .entries
                .into_iter()
                .map(|e| MoodEntryV1_1_0 {
                    id: e.id,
                    mood: e.mood,
                    energy: default_sub_score(),
                    anxiety: default_sub_score(),
                    sleep: default_sub_score(),
                    note: e.note,
                    tags: Vec::new(),
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<MoodLog> for MoodLogV1_1_0 {
    fn into_domain(self) -> MoodLog {
        MoodLog {
            entries: self
                .entries
                .into_iter()
                .map(|e| MoodEntry {
                    id: e.id,
                    mood: e.mood,
                    energy: e.energy,
                    anxiety: e.anxiety,
                    sleep: e.sleep,
                    note: e.note,
                    tags: e.tags,
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }
}

impl FromDomain<MoodLog> for MoodLogV1_1_0 {
    fn from_domain(log: MoodLog) -> Self {
        MoodLogV1_1_0 {
            entries: log
                .entries
                .into_iter()
                .map(|e| MoodEntryV1_1_0 {
                    id: e.id,
                    mood: e.mood,
                    energy: e.energy,
                    anxiety: e.anxiety,
                    sleep: e.sleep,
                    note: e.note,
                    tags: e.tags,
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the mood-entries list.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds sub-scores (defaulting to 3) and empty tags
/// - V1.1.0 → MoodLog
pub fn create_mood_log_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let path = version_migrate::Migrator::define("mood_log")
        .from::<MoodLogV1_0_0>()
        .step::<MoodLogV1_1_0>()
        .into_with_save::<MoodLog>();

    migrator
        .register(path)
        .expect("Failed to register mood_log migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_v1_0_0_gains_default_sub_scores() {
        let migrator = create_mood_log_migrator();
        let value = json!({
            "version": "1.0.0",
            "entries": [
                {"id": "a", "mood": 2, "note": "meh", "timestamp": "2025-03-01T08:00:00Z"}
            ]
        });

        let log: MoodLog = migrator.load_flat_from("mood_log", value).unwrap();
        let entry = &log.entries[0];
        assert_eq!(entry.mood, 2);
        assert_eq!((entry.energy, entry.anxiety, entry.sleep), (3, 3, 3));
        assert!(entry.tags.is_empty());
        assert_eq!(entry.note, "meh");
    }

    #[test]
    fn test_save_writes_latest_version() {
        let migrator = create_mood_log_migrator();
        let log = MoodLog {
            entries: vec![MoodEntry {
                id: "x".into(),
                mood: 5,
                energy: 4,
                anxiety: 1,
                sleep: 5,
                note: String::new(),
                tags: vec!["grateful".into()],
                timestamp: "2025-03-01T08:00:00Z".parse().unwrap(),
            }],
        };

        let json = migrator.save_domain_flat("mood_log", &log).unwrap();
        assert!(json.contains("\"version\":\"1.1.0\""));
        assert!(json.contains("\"grateful\""));
    }
}
