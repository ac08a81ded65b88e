//! Pro trial use cases.

use echo_core::entitlement::{EntitlementClock, TrialStatus};
use echo_core::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct TrialService {
    entitlement: Arc<Mutex<EntitlementClock>>,
}

impl TrialService {
    pub fn new(entitlement: Arc<Mutex<EntitlementClock>>) -> Self {
        Self { entitlement }
    }

    /// Starts the trial; a no-op once a trial has been used.
    pub async fn start_trial(&self) -> Result<TrialStatus> {
        self.entitlement.lock().await.start_trial().await
    }

    pub async fn status(&self) -> TrialStatus {
        self.entitlement.lock().await.status().await
    }

    pub async fn can_access_pro(&self) -> bool {
        self.entitlement.lock().await.can_access_pro().await
    }
}
