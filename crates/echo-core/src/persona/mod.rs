//! Personality profile domain module.
//!
//! # Module Structure
//!
//! - `model`: Profile, trait and trait-vector types
//! - `band`: Numeric-to-qualitative trait banding used by the prompt composer
//! - `preset`: The static, ordered profile catalog
//! - `catalog`: Read-only lookup over the catalog

mod band;
mod catalog;
mod model;
mod preset;

pub use band::{TraitBand, band_for, band_label};
pub use catalog::PersonalityCatalog;
pub use model::{AccessTier, PersonalityProfile, Trait, TraitVector, transition_message};
pub use preset::{DEFAULT_PERSONALITY_ID, get_default_profiles};
