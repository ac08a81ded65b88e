//! Data Transfer Objects (DTOs) for persistence.
//!
//! Every persisted collection is a flat JSON document carrying a `version`
//! field; the migrators below bring older documents forward before they are
//! converted into domain types.
//!
//! ### MoodLog Version History
//! - **1.0.0**: Entries with mood, note and timestamp only
//! - **1.1.0**: Added energy/anxiety/sleep sub-scores and tags
//!
//! ### WellnessData / ConversationArchive / TrialState
//! - **1.0.0**: Initial schema
//!
//! Documents written before versioning (a bare array, or an object without
//! `version`) are tagged by [`normalize_legacy`] before migration.

mod conversation;
mod mood_log;
mod trial_state;
mod wellness_data;

use serde_json::{Map, Value};

pub use conversation::{
    ConversationArchiveV1_0_0, ConversationRecordDTO, MessageDTO,
    create_conversation_archive_migrator,
};
pub use mood_log::{
    MoodEntryV1_0_0, MoodEntryV1_1_0, MoodLogV1_0_0, MoodLogV1_1_0, create_mood_log_migrator,
};
pub use trial_state::{TrialStateV1_0_0, create_trial_state_migrator};
pub use wellness_data::{
    ConversationSummaryDTO, MoodPointDTO, WellnessDataV1_0_0, WellnessGoalDTO,
    create_wellness_data_migrator,
};

/// Tags a pre-versioning document so the migrator can read it.
///
/// A bare array becomes `{ "version": version, array_field: [...] }`; an object
/// without a `version` gets one. Anything else is returned unchanged.
pub fn normalize_legacy(value: Value, array_field: &str, version: &str) -> Value {
    match value {
        Value::Array(items) => {
            let mut map = Map::new();
            map.insert("version".to_string(), Value::String(version.to_string()));
            map.insert(array_field.to_string(), Value::Array(items));
            Value::Object(map)
        }
        Value::Object(mut map) => {
            if !map.contains_key("version") {
                map.insert("version".to_string(), Value::String(version.to_string()));
            }
            Value::Object(map)
        }
        other => other,
    }
}
