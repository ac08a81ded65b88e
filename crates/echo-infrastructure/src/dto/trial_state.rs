//! TrialState DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use echo_core::entitlement::TrialState;

/// Trial state V1.0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct TrialStateV1_0_0 {
    #[serde(default)]
    pub is_trial_active: bool,
    #[serde(default)]
    pub trial_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_used_trial: bool,
}

impl IntoDomain<TrialState> for TrialStateV1_0_0 {
    fn into_domain(self) -> TrialState {
        TrialState {
            is_trial_active: self.is_trial_active,
            trial_start: self.trial_start_date,
            trial_end: self.trial_end_date,
            // A recorded start implies the trial was used, whatever the flag says.
            has_used_trial: self.has_used_trial || self.trial_start_date.is_some(),
        }
    }
}

impl FromDomain<TrialState> for TrialStateV1_0_0 {
    fn from_domain(state: TrialState) -> Self {
        TrialStateV1_0_0 {
            is_trial_active: state.is_trial_active,
            trial_start_date: state.trial_start,
            trial_end_date: state.trial_end,
            has_used_trial: state.has_used_trial,
        }
    }
}

/// Creates a Migrator for the trial state object.
pub fn create_trial_state_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define("trial_state")
        .from::<TrialStateV1_0_0>()
        .into_with_save::<TrialState>();
    migrator
        .register(path)
        .expect("Failed to register trial_state migration path");
    migrator
}
