//! Consolidated wellness data.

use crate::bounded::prepend_bounded;
use crate::conversation::ConversationSummary;
use crate::validation::is_valid_score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cap on derived mood points.
pub const MAX_MOOD_POINTS: usize = 100;
/// Cap on conversation summaries.
pub const MAX_SUMMARIES: usize = 50;

/// A mood value derived from a check-in, as consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub mood: u8,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessGoal {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Percent complete, 0-100
    pub progress: u8,
    pub target_date: DateTime<Utc>,
}

/// Mood points, conversation summaries and goals, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessData {
    pub mood_points: Vec<MoodPoint>,
    pub conversation_summaries: Vec<ConversationSummary>,
    pub goals: Vec<WellnessGoal>,
}

impl WellnessData {
    pub fn add_mood_point(&mut self, point: MoodPoint) {
        prepend_bounded(&mut self.mood_points, point, MAX_MOOD_POINTS);
    }

    pub fn add_summary(&mut self, summary: ConversationSummary) {
        prepend_bounded(&mut self.conversation_summaries, summary, MAX_SUMMARIES);
    }

    /// Drops points and summaries whose mood is outside 1-5, truncates both
    /// lists to their caps and clamps goal progress. Returns the number of
    /// items removed.
    pub fn enforce_bounds(&mut self) -> usize {
        let before = self.mood_points.len() + self.conversation_summaries.len();
        self.mood_points.retain(|p| is_valid_score(p.mood));
        self.mood_points.truncate(MAX_MOOD_POINTS);
        self.conversation_summaries.retain(|s| is_valid_score(s.mood));
        self.conversation_summaries.truncate(MAX_SUMMARIES);
        for goal in &mut self.goals {
            goal.progress = goal.progress.min(100);
        }
        before - self.mood_points.len() - self.conversation_summaries.len()
    }
}
