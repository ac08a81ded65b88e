//! WellnessData DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use echo_core::conversation::ConversationSummary;
use echo_core::mood::{MoodPoint, WellnessData, WellnessGoal};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodPointDTO {
    pub mood: u8,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummaryDTO {
    pub summary: String,
    pub mood: u8,
    #[serde(default)]
    pub insights: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessGoalDTO {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: u8,
    pub target_date: DateTime<Utc>,
}

/// Wellness data V1.0.0.
///
/// Keeps the `moodEntries` key for derived mood points so documents stay
/// readable by older clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct WellnessDataV1_0_0 {
    #[serde(default)]
    pub mood_entries: Vec<MoodPointDTO>,
    #[serde(default)]
    pub conversation_summaries: Vec<ConversationSummaryDTO>,
    #[serde(default)]
    pub goals: Vec<WellnessGoalDTO>,
}

impl From<ConversationSummaryDTO> for ConversationSummary {
    fn from(dto: ConversationSummaryDTO) -> Self {
        ConversationSummary {
            summary: dto.summary,
            mood: dto.mood,
            insights: dto.insights,
            timestamp: dto.timestamp,
        }
    }
}

impl From<ConversationSummary> for ConversationSummaryDTO {
    fn from(summary: ConversationSummary) -> Self {
        ConversationSummaryDTO {
            summary: summary.summary,
            mood: summary.mood,
            insights: summary.insights,
            timestamp: summary.timestamp,
        }
    }
}

impl IntoDomain<WellnessData> for WellnessDataV1_0_0 {
    fn into_domain(self) -> WellnessData {
        WellnessData {
            mood_points: self
                .mood_entries
                .into_iter()
                .map(|p| MoodPoint {
                    mood: p.mood,
                    timestamp: p.timestamp,
                    note: p.note,
                })
                .collect(),
            conversation_summaries: self
                .conversation_summaries
                .into_iter()
                .map(Into::into)
                .collect(),
            goals: self
                .goals
                .into_iter()
                .map(|g| WellnessGoal {
                    id: g.id,
                    title: g.title,
                    description: g.description,
                    progress: g.progress.min(100),
                    target_date: g.target_date,
                })
                .collect(),
        }
    }
}

impl FromDomain<WellnessData> for WellnessDataV1_0_0 {
    fn from_domain(data: WellnessData) -> Self {
        WellnessDataV1_0_0 {
            mood_entries: data
                .mood_points
                .into_iter()
                .map(|p| MoodPointDTO {
                    mood: p.mood,
                    timestamp: p.timestamp,
                    note: p.note,
                })
                .collect(),
            conversation_summaries: data
                .conversation_summaries
                .into_iter()
                .map(Into::into)
                .collect(),
            goals: data
                .goals
                .into_iter()
                .map(|g| WellnessGoalDTO {
                    id: g.id,
                    title: g.title,
                    description: g.description,
                    progress: g.progress,
                    target_date: g.target_date,
                })
                .collect(),
        }
    }
}

/// Creates a Migrator for the consolidated wellness data object.
pub fn create_wellness_data_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define("wellness_data")
        .from::<WellnessDataV1_0_0>()
        .into_with_save::<WellnessData>();
    migrator
        .register(path)
        .expect("Failed to register wellness_data migration path");
    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let migrator = create_wellness_data_migrator();
        let value = json!({
            "version": "1.0.0",
            "moodEntries": [{"mood": 4, "timestamp": "2025-01-02T03:04:05Z"}]
        });

        let data: WellnessData = migrator.load_flat_from("wellness_data", value).unwrap();
        assert_eq!(data.mood_points.len(), 1);
        assert_eq!(data.mood_points[0].note, None);
        assert!(data.conversation_summaries.is_empty());
        assert!(data.goals.is_empty());
    }

    #[test]
    fn test_saved_keys_are_camel_case() {
        let migrator = create_wellness_data_migrator();
        let mut data = WellnessData::default();
        data.add_summary(ConversationSummary {
            summary: "s".into(),
            mood: 3,
            insights: vec!["i".into()],
            timestamp: "2025-01-02T03:04:05Z".parse().unwrap(),
        });

        let json = migrator.save_domain_flat("wellness_data", &data).unwrap();
        assert!(json.contains("\"conversationSummaries\""));
        assert!(json.contains("\"moodEntries\""));
    }
}
