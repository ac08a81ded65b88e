//! Mood and wellness repository traits.

use super::entry::MoodLog;
use super::wellness_data::WellnessData;
use crate::error::Result;

/// Persistence for the raw mood-entries list.
///
/// Returns an empty log when nothing is stored and `StorageCorruption` when
/// stored data is unreadable.
#[async_trait::async_trait]
pub trait MoodRepository: Send + Sync {
    async fn load(&self) -> Result<MoodLog>;

    async fn save(&self, log: &MoodLog) -> Result<()>;
}

/// Persistence for the consolidated wellness data object.
#[async_trait::async_trait]
pub trait WellnessRepository: Send + Sync {
    async fn load(&self) -> Result<WellnessData>;

    async fn save(&self, data: &WellnessData) -> Result<()>;
}
