//! Trial entitlement module.
//!
//! # Module Structure
//!
//! - `model`: Persisted trial state and the derived entitlement state
//! - `repository`: Persistence interface for the trial state
//! - `tracker`: The entitlement clock that starts trials and answers access checks

mod model;
mod repository;
mod tracker;

pub use model::{EntitlementState, TrialState, TrialStatus};
pub use repository::TrialRepository;
pub use tracker::EntitlementClock;
