//! Mood journal.

use super::entry::{MAX_MOOD_ENTRIES, MoodEntry, MoodLog, MoodSubmission};
use super::repository::{MoodRepository, WellnessRepository};
use super::wellness_data::{MoodPoint, WellnessData};
use crate::bounded::prepend_bounded;
use crate::clock::Clock;
use crate::conversation::ConversationSummary;
use crate::error::Result;
use std::sync::Arc;

/// Owns the raw mood-entries list and the consolidated wellness data.
///
/// A submission lands at index 0 of both collections; each collection is
/// truncated to its own cap before it is written back.
pub struct MoodJournal {
    mood_repository: Arc<dyn MoodRepository>,
    wellness_repository: Arc<dyn WellnessRepository>,
    clock: Arc<dyn Clock>,
    log: MoodLog,
    wellness: WellnessData,
}

impl MoodJournal {
    /// Loads both collections; unreadable data resets a collection to empty.
    pub async fn load(
        mood_repository: Arc<dyn MoodRepository>,
        wellness_repository: Arc<dyn WellnessRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut log = match mood_repository.load().await {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("[MoodJournal] Resetting unreadable mood entries: {}", e);
                MoodLog::default()
            }
        };
        let dropped = log.enforce_bounds();
        if dropped > 0 {
            tracing::warn!("[MoodJournal] Dropped {} out-of-range mood entries", dropped);
        }

        let mut wellness = match wellness_repository.load().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("[MoodJournal] Resetting unreadable wellness data: {}", e);
                WellnessData::default()
            }
        };
        let dropped = wellness.enforce_bounds();
        if dropped > 0 {
            tracing::warn!("[MoodJournal] Dropped {} out-of-range wellness items", dropped);
        }

        Self {
            mood_repository,
            wellness_repository,
            clock,
            log,
            wellness,
        }
    }

    /// Validates and records a check-in. Nothing is written on validation failure.
    ///
    /// Both collections are updated in memory only after both saves succeed.
    /// If the wellness save fails the raw list on disk is restored.
    pub async fn submit(&mut self, submission: MoodSubmission) -> Result<MoodEntry> {
        let entry = submission.into_entry(self.clock.now())?;

        let mut log = self.log.clone();
        prepend_bounded(&mut log.entries, entry.clone(), MAX_MOOD_ENTRIES);
        let mut wellness = self.wellness.clone();
        wellness.add_mood_point(MoodPoint {
            mood: entry.mood,
            timestamp: entry.timestamp,
            note: (!entry.note.is_empty()).then(|| entry.note.clone()),
        });

        self.mood_repository.save(&log).await?;
        if let Err(e) = self.wellness_repository.save(&wellness).await {
            if let Err(restore) = self.mood_repository.save(&self.log).await {
                tracing::error!("[MoodJournal] Failed to restore mood entries: {}", restore);
            }
            return Err(e);
        }

        self.log = log;
        self.wellness = wellness;
        tracing::info!("[MoodJournal] Recorded mood {} ({} tags)", entry.mood, entry.tags.len());
        Ok(entry)
    }

    /// Records a conversation summary for the aggregator.
    pub async fn add_summary(&mut self, summary: ConversationSummary) -> Result<()> {
        let mut wellness = self.wellness.clone();
        wellness.add_summary(summary);
        self.wellness_repository.save(&wellness).await?;
        self.wellness = wellness;
        Ok(())
    }

    /// The newest `n` entries.
    pub fn recent_entries(&self, n: usize) -> &[MoodEntry] {
        let end = n.min(self.log.entries.len());
        &self.log.entries[..end]
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.log.entries
    }

    pub fn last_mood(&self) -> Option<u8> {
        self.log.entries.first().map(|e| e.mood)
    }

    pub fn wellness(&self) -> &WellnessData {
        &self.wellness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::EchoError;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryMoods {
        stored: Mutex<Option<MoodLog>>,
        saves: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl MoodRepository for MemoryMoods {
        async fn load(&self) -> Result<MoodLog> {
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, log: &MoodLog) -> Result<()> {
            *self.stored.lock().unwrap() = Some(log.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryWellness {
        stored: Mutex<Option<WellnessData>>,
        corrupt: bool,
        fail_saves: bool,
    }

    #[async_trait::async_trait]
    impl WellnessRepository for MemoryWellness {
        async fn load(&self) -> Result<WellnessData> {
            if self.corrupt {
                return Err(EchoError::storage_corruption("wellness-data", "truncated"));
            }
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, data: &WellnessData) -> Result<()> {
            if self.fail_saves {
                return Err(EchoError::io("disk full"));
            }
            *self.stored.lock().unwrap() = Some(data.clone());
            Ok(())
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_submit_places_entry_first() {
        let moods = Arc::new(MemoryMoods::default());
        let clock = clock();
        let mut journal =
            MoodJournal::load(moods.clone(), Arc::new(MemoryWellness::default()), clock.clone())
                .await;

        journal.submit(MoodSubmission::new(2)).await.unwrap();
        clock.advance(Duration::hours(1));
        let entry = journal
            .submit(MoodSubmission {
                mood: 5,
                energy: Some(4),
                anxiety: Some(1),
                sleep: Some(5),
                note: None,
                tags: vec!["grateful".into()],
            })
            .await
            .unwrap();

        assert_eq!(journal.recent_entries(7)[0].id, entry.id);
        assert_eq!(journal.last_mood(), Some(5));
        assert_eq!(journal.wellness().mood_points[0].mood, 5);
        assert_eq!(moods.stored.lock().unwrap().as_ref().unwrap().entries.len(), 2);
    }

    #[tokio::test]
    async fn test_raw_entries_cap_at_thirty() {
        let mut journal = MoodJournal::load(
            Arc::new(MemoryMoods::default()),
            Arc::new(MemoryWellness::default()),
            clock(),
        )
        .await;

        for _ in 0..45 {
            journal.submit(MoodSubmission::new(3)).await.unwrap();
        }

        assert_eq!(journal.entries().len(), MAX_MOOD_ENTRIES);
        assert_eq!(journal.wellness().mood_points.len(), 45);
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let moods = Arc::new(MemoryMoods::default());
        let mut journal =
            MoodJournal::load(moods.clone(), Arc::new(MemoryWellness::default()), clock()).await;

        assert!(journal.submit(MoodSubmission::new(7)).await.is_err());
        assert_eq!(*moods.saves.lock().unwrap(), 0);
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_wellness_data_resets_to_empty() {
        let wellness = Arc::new(MemoryWellness {
            corrupt: true,
            ..Default::default()
        });
        let journal = MoodJournal::load(Arc::new(MemoryMoods::default()), wellness, clock()).await;
        assert!(journal.wellness().mood_points.is_empty());
        assert!(journal.wellness().conversation_summaries.is_empty());
    }

    #[tokio::test]
    async fn test_failed_wellness_save_rolls_back_submission() {
        let moods = Arc::new(MemoryMoods::default());
        let wellness = Arc::new(MemoryWellness {
            fail_saves: true,
            ..Default::default()
        });
        let mut journal = MoodJournal::load(moods.clone(), wellness, clock()).await;

        assert!(journal.submit(MoodSubmission::new(4)).await.is_err());

        assert!(journal.entries().is_empty());
        assert!(journal.wellness().mood_points.is_empty());
        // first save wrote the entry, the restore wrote the empty list back
        assert_eq!(*moods.saves.lock().unwrap(), 2);
        assert!(moods.stored.lock().unwrap().as_ref().unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_failed_summary_save_keeps_memory_unchanged() {
        let wellness = Arc::new(MemoryWellness {
            fail_saves: true,
            ..Default::default()
        });
        let mut journal =
            MoodJournal::load(Arc::new(MemoryMoods::default()), wellness, clock()).await;

        let summary = ConversationSummary {
            summary: "long talk".into(),
            mood: 3,
            insights: vec!["rest".into()],
            timestamp: Utc::now(),
        };
        assert!(journal.add_summary(summary).await.is_err());
        assert!(journal.wellness().conversation_summaries.is_empty());
    }

    #[tokio::test]
    async fn test_load_drops_out_of_range_entries() {
        let moods = Arc::new(MemoryMoods::default());
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let mut log = MoodLog::default();
        for mood in [9, 4, 0] {
            let mut entry = MoodSubmission::new(3).into_entry(now).unwrap();
            entry.mood = mood;
            log.entries.push(entry);
        }
        *moods.stored.lock().unwrap() = Some(log);

        let journal = MoodJournal::load(moods, Arc::new(MemoryWellness::default()), clock()).await;
        assert_eq!(journal.entries().len(), 1);
        assert_eq!(journal.last_mood(), Some(4));
    }
}
