//! Read-only profile catalog.

use super::model::PersonalityProfile;
use super::preset::{DEFAULT_PERSONALITY_ID, get_default_profiles};
use crate::error::{EchoError, Result};

/// The ordered set of selectable profiles.
#[derive(Debug, Clone)]
pub struct PersonalityCatalog {
    profiles: Vec<PersonalityProfile>,
}

impl Default for PersonalityCatalog {
    fn default() -> Self {
        Self::new(get_default_profiles())
    }
}

impl PersonalityCatalog {
    pub fn new(profiles: Vec<PersonalityProfile>) -> Self {
        Self { profiles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalityProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Looks up a profile by id.
    pub fn select(&self, id: &str) -> Result<&PersonalityProfile> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EchoError::not_found("personality", id))
    }

    /// The default profile, or the first one if the default id is absent.
    pub fn default_profile(&self) -> Result<&PersonalityProfile> {
        self.select(DEFAULT_PERSONALITY_ID)
            .or_else(|_| {
                self.profiles
                    .first()
                    .ok_or_else(|| EchoError::internal("personality catalog is empty"))
            })
    }
}
