//! Mood tracking domain module.
//!
//! # Module Structure
//!
//! - `entry`: Raw mood entries, submissions and mood labels
//! - `wellness_data`: The consolidated wellness data object (mood points, summaries, goals)
//! - `repository`: Persistence interfaces for both collections
//! - `journal`: Submission and bounded bookkeeping over both collections

mod entry;
mod journal;
mod repository;
mod wellness_data;

pub use entry::{COMMON_TAGS, MAX_MOOD_ENTRIES, MoodEntry, MoodLog, MoodSubmission, mood_label};
pub use journal::MoodJournal;
pub use repository::{MoodRepository, WellnessRepository};
pub use wellness_data::{
    MAX_MOOD_POINTS, MAX_SUMMARIES, MoodPoint, WellnessData, WellnessGoal,
};
