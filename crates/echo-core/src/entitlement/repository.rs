//! Trial repository trait.

use super::model::TrialState;
use crate::error::Result;

/// Persistence for the trial state object.
///
/// A missing record loads as `TrialState::default()`.
#[async_trait::async_trait]
pub trait TrialRepository: Send + Sync {
    async fn load(&self) -> Result<TrialState>;

    async fn save(&self, state: &TrialState) -> Result<()>;
}
