//! Entitlement clock.

use super::model::{EntitlementState, TrialState, TrialStatus};
use super::repository::TrialRepository;
use crate::clock::Clock;
use crate::config::DEFAULT_TRIAL_DURATION_DAYS;
use crate::error::Result;
use chrono::Duration;
use std::sync::Arc;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Tracks the Pro trial and derives the current access level.
///
/// Expiry is evaluated lazily on every check; there is no background timer.
/// When a check observes that the cached active flag has gone stale, the
/// corrected state is written back.
pub struct EntitlementClock {
    repository: Arc<dyn TrialRepository>,
    clock: Arc<dyn Clock>,
    trial_duration: Duration,
    state: TrialState,
}

impl EntitlementClock {
    pub async fn load(repository: Arc<dyn TrialRepository>, clock: Arc<dyn Clock>) -> Self {
        let state = match repository.load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("[EntitlementClock] Resetting unreadable trial state: {}", e);
                TrialState::default()
            }
        };
        Self {
            repository,
            clock,
            trial_duration: Duration::days(DEFAULT_TRIAL_DURATION_DAYS),
            state,
        }
    }

    pub fn with_trial_days(mut self, days: i64) -> Self {
        self.trial_duration = Duration::days(days.max(0));
        self
    }

    /// Starts the trial. A no-op once any trial has been used.
    pub async fn start_trial(&mut self) -> Result<TrialStatus> {
        if self.state.has_used_trial {
            tracing::info!("[EntitlementClock] Trial already used, ignoring start request");
            return Ok(self.status().await);
        }

        let now = self.clock.now();
        let next = TrialState {
            is_trial_active: true,
            trial_start: Some(now),
            trial_end: Some(now + self.trial_duration),
            has_used_trial: true,
        };
        self.repository.save(&next).await?;
        self.state = next;

        tracing::info!("[EntitlementClock] Trial started, ends {:?}", self.state.trial_end);
        Ok(self.status().await)
    }

    /// Whether Pro features are available right now.
    ///
    /// Only an active trial grants access; there is no subscription source.
    pub async fn can_access_pro(&mut self) -> bool {
        self.refresh().await == EntitlementState::TrialActive
    }

    /// Whole days left in the trial, rounded up; 0 unless the trial is active.
    pub async fn days_remaining(&mut self) -> i64 {
        if self.refresh().await != EntitlementState::TrialActive {
            return 0;
        }
        let Some(end) = self.state.trial_end else {
            return 0;
        };
        let millis = (end - self.clock.now()).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
        }
    }

    pub async fn status(&mut self) -> TrialStatus {
        let state = self.refresh().await;
        let days_remaining = self.days_remaining().await;
        TrialStatus {
            state,
            has_used_trial: self.state.has_used_trial,
            trial_start: self.state.trial_start,
            trial_end: self.state.trial_end,
            days_remaining,
            can_access_pro: state == EntitlementState::TrialActive,
        }
    }

    /// The cached persisted state.
    pub fn trial_state(&self) -> &TrialState {
        &self.state
    }

    async fn refresh(&mut self) -> EntitlementState {
        let derived = self.state.state_at(self.clock.now());
        let active = derived == EntitlementState::TrialActive;
        if self.state.is_trial_active != active {
            self.state.is_trial_active = active;
            if let Err(e) = self.repository.save(&self.state).await {
                tracing::warn!("[EntitlementClock] Failed to persist trial expiry: {}", e);
            } else {
                tracing::info!("[EntitlementClock] Trial state now {:?}", derived);
            }
        }
        derived
    }
}
