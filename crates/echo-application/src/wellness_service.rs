//! Mood check-ins and on-demand insights.

use echo_core::clock::Clock;
use echo_core::error::Result;
use echo_core::mood::{MoodEntry, MoodJournal, MoodSubmission};
use echo_core::wellness::{Insights, TimeWindow, compute_insights};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Number of entries the mood history view shows.
pub const RECENT_ENTRY_COUNT: usize = 7;

#[derive(Clone)]
pub struct WellnessService {
    journal: Arc<Mutex<MoodJournal>>,
    clock: Arc<dyn Clock>,
}

impl WellnessService {
    pub fn new(journal: Arc<Mutex<MoodJournal>>, clock: Arc<dyn Clock>) -> Self {
        Self { journal, clock }
    }

    pub async fn submit_mood(&self, submission: MoodSubmission) -> Result<MoodEntry> {
        self.journal.lock().await.submit(submission).await
    }

    /// The newest `n` check-ins.
    pub async fn recent_entries(&self, n: usize) -> Vec<MoodEntry> {
        self.journal.lock().await.recent_entries(n).to_vec()
    }

    /// Recomputes insights over `window` from the persisted wellness data.
    pub async fn insights(&self, window: TimeWindow) -> Insights {
        let journal = self.journal.lock().await;
        let data = journal.wellness();
        compute_insights(
            &data.mood_points,
            &data.conversation_summaries,
            window,
            self.clock.now(),
        )
    }
}
