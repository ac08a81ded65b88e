//! Personality domain model.

use crate::error::{EchoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which entitlement a profile requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    Free,
    Premium,
}

/// One of the five tone dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Empathy,
    Energy,
    Formality,
    Humor,
    Directness,
}

impl Trait {
    /// All traits in rendering order.
    pub const ALL: [Trait; 5] = [
        Trait::Empathy,
        Trait::Energy,
        Trait::Formality,
        Trait::Humor,
        Trait::Directness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Empathy => "empathy",
            Trait::Energy => "energy",
            Trait::Formality => "formality",
            Trait::Humor => "humor",
            Trait::Directness => "directness",
        }
    }

    /// Capitalized name used in prompt text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Trait::Empathy => "Empathy",
            Trait::Energy => "Energy",
            Trait::Formality => "Formality",
            Trait::Humor => "Humor",
            Trait::Directness => "Directness",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trait {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empathy" => Ok(Trait::Empathy),
            "energy" => Ok(Trait::Energy),
            "formality" => Ok(Trait::Formality),
            "humor" | "humour" => Ok(Trait::Humor),
            "directness" => Ok(Trait::Directness),
            other => Err(EchoError::validation(format!("Unknown trait '{}'", other))),
        }
    }
}

/// A five-dimensional trait vector, every component in [0, 100].
///
/// Deserialized input is clamped into range like any other write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UncheckedTraits")]
pub struct TraitVector {
    empathy: u8,
    energy: u8,
    formality: u8,
    humor: u8,
    directness: u8,
}

#[derive(Deserialize)]
struct UncheckedTraits {
    empathy: i64,
    energy: i64,
    formality: i64,
    humor: i64,
    directness: i64,
}

impl From<UncheckedTraits> for TraitVector {
    fn from(raw: UncheckedTraits) -> Self {
        let clamp = |v: i64| v.clamp(0, Self::MAX as i64) as u8;
        Self {
            empathy: clamp(raw.empathy),
            energy: clamp(raw.energy),
            formality: clamp(raw.formality),
            humor: clamp(raw.humor),
            directness: clamp(raw.directness),
        }
    }
}

impl TraitVector {
    pub const MAX: u8 = 100;

    /// Builds a vector, clamping every component into range.
    pub fn new(empathy: u8, energy: u8, formality: u8, humor: u8, directness: u8) -> Self {
        Self {
            empathy: empathy.min(Self::MAX),
            energy: energy.min(Self::MAX),
            formality: formality.min(Self::MAX),
            humor: humor.min(Self::MAX),
            directness: directness.min(Self::MAX),
        }
    }

    pub fn get(&self, t: Trait) -> u8 {
        match t {
            Trait::Empathy => self.empathy,
            Trait::Energy => self.energy,
            Trait::Formality => self.formality,
            Trait::Humor => self.humor,
            Trait::Directness => self.directness,
        }
    }

    /// Sets one trait, clamped to [0, 100]. Returns the stored value.
    pub fn set(&mut self, t: Trait, value: i32) -> u8 {
        let clamped = value.clamp(0, Self::MAX as i32) as u8;
        *self.slot(t) = clamped;
        clamped
    }

    /// Moves one trait by `delta`, clamped to [0, 100]. Returns the stored value.
    pub fn adjust(&mut self, t: Trait, delta: i32) -> u8 {
        let current = self.get(t) as i32;
        self.set(t, current + delta)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, u8)> + '_ {
        Trait::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    fn slot(&mut self, t: Trait) -> &mut u8 {
        match t {
            Trait::Empathy => &mut self.empathy,
            Trait::Energy => &mut self.energy,
            Trait::Formality => &mut self.formality,
            Trait::Humor => &mut self.humor,
            Trait::Directness => &mut self.directness,
        }
    }
}

/// A selectable companion persona. Profiles are static and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Stable short identifier (e.g. `sarah`)
    pub id: String,
    /// Display name
    pub name: String,
    pub description: String,
    /// Base trait vector the session resets to on selection
    pub traits: TraitVector,
    /// First companion message of a session
    pub greeting: String,
    /// Profile-specific system instructions
    pub system_prompt: String,
    pub specialties: Vec<String>,
    pub tier: AccessTier,
}

impl PersonalityProfile {
    pub fn is_premium(&self) -> bool {
        self.tier == AccessTier::Premium
    }
}

/// Text of the companion message emitted when the active profile changes.
pub fn transition_message(profile: &PersonalityProfile) -> String {
    format!("I'm now {}! {}", profile.name, profile.greeting)
}
