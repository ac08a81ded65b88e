//! Trial state model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted trial bookkeeping.
///
/// `has_used_trial` only ever moves from false to true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialState {
    /// Cached flag, cleared lazily once `now > trial_end`
    pub is_trial_active: bool,
    pub trial_start: Option<DateTime<Utc>>,
    pub trial_end: Option<DateTime<Utc>>,
    pub has_used_trial: bool,
}

impl TrialState {
    /// Derives the entitlement state at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> EntitlementState {
        if !self.has_used_trial {
            return EntitlementState::NoTrialUsed;
        }
        match self.trial_end {
            Some(end) if now <= end => EntitlementState::TrialActive,
            _ => EntitlementState::TrialExpired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementState {
    NoTrialUsed,
    TrialActive,
    TrialExpired,
}

/// Snapshot returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStatus {
    pub state: EntitlementState,
    pub has_used_trial: bool,
    pub trial_start: Option<DateTime<Utc>>,
    pub trial_end: Option<DateTime<Utc>>,
    pub days_remaining: i64,
    pub can_access_pro: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_state_boundaries() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(30);
        let state = TrialState {
            is_trial_active: true,
            trial_start: Some(start),
            trial_end: Some(end),
            has_used_trial: true,
        };

        assert_eq!(state.state_at(end), EntitlementState::TrialActive);
        assert_eq!(
            state.state_at(end + Duration::milliseconds(1)),
            EntitlementState::TrialExpired
        );
        assert_eq!(
            TrialState::default().state_at(end),
            EntitlementState::NoTrialUsed
        );
    }
}
