//! Trait banding.
//!
//! A pure, total mapping from a trait value in [0, 100] to one of three
//! qualitative bands. Thresholds are strict, so a value of exactly 70 lands in
//! the middle band and exactly 40 in the low band.

use super::model::Trait;

/// Qualitative band for a trait value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitBand {
    High,
    Medium,
    Low,
}

const HIGH_THRESHOLD: u8 = 70;
const MEDIUM_THRESHOLD: u8 = 40;

/// Labels per trait, indexed high / medium / low.
const BAND_LABELS: [(Trait, [&str; 3]); 5] = [
    (
        Trait::Empathy,
        ["very empathetic", "moderately empathetic", "more logical"],
    ),
    (
        Trait::Energy,
        ["high energy", "moderate energy", "calm and measured"],
    ),
    (Trait::Formality, ["formal", "semi-formal", "casual"]),
    (
        Trait::Humor,
        ["playful and humorous", "occasionally humorous", "serious"],
    ),
    (
        Trait::Directness,
        [
            "direct and straightforward",
            "balanced approach",
            "gentle and indirect",
        ],
    ),
];

pub fn band_for(value: u8) -> TraitBand {
    if value > HIGH_THRESHOLD {
        TraitBand::High
    } else if value > MEDIUM_THRESHOLD {
        TraitBand::Medium
    } else {
        TraitBand::Low
    }
}

/// Human-readable band label for `value` of trait `t`.
pub fn band_label(t: Trait, value: u8) -> &'static str {
    let index = match band_for(value) {
        TraitBand::High => 0,
        TraitBand::Medium => 1,
        TraitBand::Low => 2,
    };
    BAND_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == t)
        .map(|(_, labels)| labels[index])
        .unwrap_or("balanced")
}
